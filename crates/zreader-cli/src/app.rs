//! Command handlers for the Z Reader CLI.
//!
//! `App` wires the file-backed session store into the API client and routes
//! every call result through the expiry guard.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use tracing::warn;

use zreader_core::models::{LoginRequest, NewCategory, UpdateProfile, UserInfo};
use zreader_core::{ApiClient, ApiError, AuthState, Config, Envelope, ExpiryGuard, FileSessionStore};

use crate::navigator::CliNavigator;
use crate::{CategoryAction, StorageAction};

pub struct App {
    config: Config,
    client: ApiClient,
    guard: ExpiryGuard,
    navigator: Arc<CliNavigator>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let store = Arc::new(FileSessionStore::new(data_dir));
        let client = ApiClient::new(store).context("Failed to create API client")?;

        let navigator = Arc::new(CliNavigator::new());
        let guard = ExpiryGuard::new(navigator.clone());

        Ok(Self {
            config,
            client,
            guard,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url().as_str()
    }

    pub fn login_requested(&self) -> bool {
        self.navigator.take_login_request()
    }

    fn is_authenticated(&self) -> Result<bool> {
        Ok(AuthState::of(self.client.session().as_ref())?.is_authenticated())
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn login(&mut self, username: Option<String>) -> Result<()> {
        let username = match username.or_else(|| self.config.last_username.clone()) {
            Some(name) if !name.trim().is_empty() => name,
            _ => prompt_username()?,
        };
        let password = match std::env::var("ZREADER_PASSWORD") {
            Ok(password) if !password.is_empty() => password,
            _ => rpassword::prompt_password("Password: ")?,
        };

        let envelope = self
            .client
            .login(&LoginRequest::new(username.as_str(), password))
            .await?;
        let login = require_data(envelope)?;

        self.config.last_username = Some(username);
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }

        println!("Logged in as {}", login.user_info.display_name());
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        match self.client.logout().await {
            Ok(envelope) if !envelope.is_success() => {
                warn!(code = %envelope.code, "Server rejected logout");
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Logout request failed"),
        }
        println!("Logged out");
        Ok(())
    }

    pub async fn whoami(&self) -> Result<()> {
        if !self.is_authenticated()? {
            println!("Not logged in");
            return Ok(());
        }
        let envelope = self.guard.observe(self.client.current_user().await)?;
        print_user(&require_data(envelope)?);
        Ok(())
    }

    pub async fn update_profile(&self, update: UpdateProfile) -> Result<()> {
        if update.is_empty() {
            bail!("Nothing to update; pass at least one field");
        }
        let envelope = self.guard.observe(self.client.update_profile(&update).await)?;
        print_user(&require_data(envelope)?);
        Ok(())
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub async fn categories(&self, action: CategoryAction) -> Result<()> {
        match action {
            CategoryAction::List => {
                let envelope = self.guard.observe(self.client.list_categories().await)?;
                let categories = require_success(envelope)?.unwrap_or_default();
                if categories.is_empty() {
                    println!("No categories");
                }
                for category in categories {
                    println!("{:>6}  {}", category.id, category.name);
                }
            }
            CategoryAction::Add { name } => {
                let envelope = self
                    .guard
                    .observe(self.client.create_category(&NewCategory::named(name)).await)?;
                let category = require_data(envelope)?;
                println!("Created category {} ({})", category.name, category.id);
            }
            CategoryAction::Rename { id, name } => {
                let envelope = self
                    .guard
                    .observe(self.client.update_category(id, &NewCategory::named(name)).await)?;
                require_success(envelope)?;
                println!("Renamed category {}", id);
            }
            CategoryAction::Remove { id } => {
                let envelope = self.guard.observe(self.client.delete_category(id).await)?;
                require_success(envelope)?;
                println!("Removed category {}", id);
            }
        }
        Ok(())
    }

    pub async fn storages(&self, action: StorageAction) -> Result<()> {
        match action {
            StorageAction::List => {
                let envelope = self.guard.observe(self.client.list_storages().await)?;
                let storages = require_success(envelope)?.unwrap_or_default();
                if storages.is_empty() {
                    println!("No storage providers");
                }
                for storage in storages {
                    let marker = if storage.active { "*" } else { " " };
                    println!(
                        "{} {:>6}  {:<24} {}",
                        marker, storage.id, storage.name, storage.provider_type
                    );
                }
            }
            StorageAction::Toggle { id } => {
                let envelope = self.guard.observe(self.client.toggle_storage_active(id).await)?;
                require_success(envelope)?;
                println!("Toggled storage provider {}", id);
            }
            StorageAction::Remove { id } => {
                let envelope = self.guard.observe(self.client.delete_storage(id).await)?;
                require_success(envelope)?;
                println!("Removed storage provider {}", id);
            }
        }
        Ok(())
    }
}

/// Turn a business failure into an error carrying the table message
fn require_success<T>(envelope: Envelope<T>) -> Result<Option<T>> {
    envelope.into_result().map_err(user_facing)
}

fn require_data<T>(envelope: Envelope<T>) -> Result<T> {
    envelope.into_data().map_err(user_facing)
}

fn user_facing(e: ApiError) -> anyhow::Error {
    match e.code() {
        Some(code) => anyhow!("{} [{}]", e.user_message(), code),
        None => anyhow!(e),
    }
}

fn prompt_username() -> Result<String> {
    print!("Username: ");
    io::stdout().flush()?;

    let mut username = String::new();
    io::stdin().read_line(&mut username)?;
    let username = username.trim().to_string();
    if username.is_empty() {
        bail!("Username required");
    }
    Ok(username)
}

fn print_user(user: &UserInfo) {
    println!("{} (@{})", user.display_name(), user.username);
    println!("  id:      {}", user.id);
    if let Some(ref email) = user.email {
        println!("  email:   {}", email);
    }
    if let Some(ref bio) = user.bio {
        println!("  bio:     {}", bio);
    }
    println!("  role:    {}", if user.is_admin() { "admin" } else { "user" });
    println!("  joined:  {}", user.created_at);
}

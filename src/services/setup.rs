//! Setup service
//!
//! `/start`, claiming the admin role with the one-time code and connecting the
//! destination channel.

use std::sync::Arc;
use teloxide::types::{ChatId, Recipient};
use tracing::{debug, info, warn};
use crate::database::DatabaseService;
use crate::models::setting::{parse_channel_input, ChannelInputError, ChannelRef};
use crate::models::user::CreateUserRequest;
use crate::state::{ConversationState, StateStorage};
use crate::utils::errors::Result;
use crate::utils::helpers::normalize_admin_code;
use crate::utils::logging::{announce_admin_code, log_admin_action};
use crate::views::{keyboards, texts, Screen};
use super::auth::AuthService;
use super::connector::ChatConnector;
use super::menu::MenuService;

/// Result of a setup code attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed,
    WrongCode,
    /// Someone else became admin first
    AlreadyClaimed,
}

/// Result of a channel reference sent by the admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSetupOutcome {
    /// Stored as the resolved numeric id
    Connected { channel_id: i64, title: Option<String> },
    InvalidInput(ChannelInputError),
    LookupFailed(String),
    NotPublishable,
    BotNotAdmin,
}

#[derive(Clone)]
pub struct SetupService {
    database: DatabaseService,
    auth: AuthService,
    states: Arc<StateStorage>,
    connector: Arc<dyn ChatConnector>,
    menu: MenuService,
}

impl SetupService {
    pub fn new(
        database: DatabaseService,
        auth: AuthService,
        states: Arc<StateStorage>,
        connector: Arc<dyn ChatConnector>,
        menu: MenuService,
    ) -> Self {
        Self {
            database,
            auth,
            states,
            connector,
            menu,
        }
    }

    /// Print the setup code to the console if no admin is configured yet
    pub async fn announce_pending_setup(&self) -> Result<Option<String>> {
        let code = self.database.settings.ensure_admin_code().await?;
        match &code {
            Some(code) => announce_admin_code(code),
            None => {
                if let Some(admin_id) = self.database.settings.get_admin_id().await? {
                    info!(admin_id = admin_id, "Administrator configured");
                }
                if let Some(channel) = self.database.settings.get_channel_id().await? {
                    info!(channel = %channel, "Channel connected");
                }
            }
        }
        Ok(code)
    }

    /// Handle `/start`
    ///
    /// Without an admin every user is asked for the setup code.
    pub async fn start(&self, profile: CreateUserRequest) -> Result<()> {
        let user_id = profile.user_id;
        let chat = ChatId(user_id);
        let first_name = profile.first_name.clone();
        self.database.register_user(profile).await?;

        if !self.auth.has_admin().await? {
            if self.database.settings.get_admin_code().await?.is_none() {
                let code = self.database.settings.generate_admin_code().await?;
                announce_admin_code(&code);
            } else {
                debug!(user_id = user_id, "Setup code already issued");
            }
            self.states.set(user_id, ConversationState::AwaitingAdminCode);
            self.connector.send_text(chat, &texts::setup_prompt(), None).await?;
            return Ok(());
        }

        if self.database.users.is_banned(user_id).await? {
            self.states.clear(user_id);
            self.connector.send_text(chat, &texts::banned(), None).await?;
            return Ok(());
        }

        self.states.clear(user_id);
        self.menu.welcome(user_id, &first_name, Screen::New(chat)).await
    }

    /// Handle text sent while awaiting the setup code
    pub async fn submit_admin_code(&self, user_id: i64, input: &str) -> Result<ClaimOutcome> {
        let chat = ChatId(user_id);
        let code = normalize_admin_code(input);

        if self.database.settings.claim_admin(user_id, &code).await? {
            self.states.clear(user_id);
            log_admin_action(user_id, "claim_admin", None, None);
            self.connector.send_text(chat, &texts::admin_claimed(), None).await?;
            self.menu.main_menu(user_id, Screen::New(chat)).await?;
            return Ok(ClaimOutcome::Claimed);
        }

        if self.auth.has_admin().await? {
            self.states.clear(user_id);
            self.connector.send_text(chat, &texts::admin_already_claimed(), None).await?;
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        debug!(user_id = user_id, "Wrong setup code");
        self.connector.send_text(chat, &texts::admin_code_invalid(), None).await?;
        Ok(ClaimOutcome::WrongCode)
    }

    /// Ask the admin for the destination channel
    pub async fn begin_channel_setup(&self, actor: i64, screen: Screen) -> Result<()> {
        self.auth.require_admin(actor, "configure the channel").await?;

        self.states.set(actor, ConversationState::AwaitingChannel);
        screen
            .show(self.connector.as_ref(), &texts::channel_prompt(), Some(keyboards::cancel()))
            .await
    }

    /// Handle a channel reference sent while awaiting the channel
    ///
    /// Only a successful connection leaves the state; anything else re-prompts.
    pub async fn submit_channel(&self, actor: i64, input: &str) -> Result<ChannelSetupOutcome> {
        if let Err(e) = self.auth.require_admin(actor, "configure the channel").await {
            self.states.clear(actor);
            return Err(e);
        }

        let chat = ChatId(actor);
        let outcome = self.resolve_channel(input).await?;

        let reply = match &outcome {
            ChannelSetupOutcome::Connected { channel_id, title } => {
                self.states.clear(actor);
                log_admin_action(actor, "set_channel", Some(&channel_id.to_string()), title.as_deref());
                self.connector
                    .send_text(chat, &texts::channel_connected(title.as_deref(), *channel_id), None)
                    .await?;
                return Ok(outcome);
            }
            ChannelSetupOutcome::InvalidInput(e) => texts::channel_input_error(e),
            ChannelSetupOutcome::LookupFailed(e) => texts::channel_lookup_failed(e),
            ChannelSetupOutcome::NotPublishable => texts::channel_not_publishable(),
            ChannelSetupOutcome::BotNotAdmin => texts::bot_not_channel_admin(),
        };

        self.connector.send_text(chat, &reply, Some(keyboards::cancel())).await?;
        Ok(outcome)
    }

    async fn resolve_channel(&self, input: &str) -> Result<ChannelSetupOutcome> {
        let reference = match parse_channel_input(input) {
            Ok(reference) => reference,
            Err(e) => return Ok(ChannelSetupOutcome::InvalidInput(e)),
        };

        let recipient: Recipient = reference.to_recipient();
        let chat = match self.connector.lookup_chat(recipient).await {
            Ok(chat) => chat,
            Err(e) => {
                warn!(channel = %reference, error = %e, "Channel lookup failed");
                return Ok(ChannelSetupOutcome::LookupFailed(e.to_string()));
            }
        };

        if !chat.accepts_publications() {
            return Ok(ChannelSetupOutcome::NotPublishable);
        }

        match self.connector.bot_is_admin(chat.id).await {
            Ok(true) => {}
            Ok(false) => return Ok(ChannelSetupOutcome::BotNotAdmin),
            Err(e) => {
                warn!(channel_id = chat.id.0, error = %e, "Bot membership check failed");
                return Ok(ChannelSetupOutcome::BotNotAdmin);
            }
        }

        self.database.settings.set_channel_id(&ChannelRef::Id(chat.id.0)).await?;
        Ok(ChannelSetupOutcome::Connected {
            channel_id: chat.id.0,
            title: chat.title,
        })
    }
}

// SPDX-FileCopyrightText: 2026 Sepfinder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The wizard driver: interprets user text against the current step.
//!
//! Conversations are independent. Each one is expected to be fed one message
//! at a time; the step is read out of the session map, handled without
//! holding any map lock across an await, and written back.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use sepfinder_catalog::{DeviceCatalog, DeviceDetail, DeviceSummary};
use sepfinder_core::{ChatShell, ConversationId, Keyboard, Reply, SepfinderError};
use sepfinder_manifest::{find_components, ExtractionProgress, ManifestResolver};
use tracing::{debug, info, warn};

use crate::prompts;
use crate::report::format_report;
use crate::session::{DeviceType, WizardStep};

/// Drives every conversation through the device, board and firmware prompts.
pub struct Wizard {
    catalog: Arc<dyn DeviceCatalog>,
    resolver: ManifestResolver,
    shell: Arc<dyn ChatShell>,
    sessions: DashMap<ConversationId, WizardStep>,
}

impl Wizard {
    pub fn new(
        catalog: Arc<dyn DeviceCatalog>,
        resolver: ManifestResolver,
        shell: Arc<dyn ChatShell>,
    ) -> Self {
        Self {
            catalog,
            resolver,
            shell,
            sessions: DashMap::new(),
        }
    }

    /// Current step of `conversation`. Unknown conversations are idle.
    pub fn step(&self, conversation: &ConversationId) -> WizardStep {
        self.sessions
            .get(conversation)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Number of conversations with a wizard in progress.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Handles `/start`: discards any session data and asks for a device type.
    pub async fn on_start(&self, conversation: &ConversationId) -> Result<(), SepfinderError> {
        info!(conversation = %conversation, "wizard started");
        self.set_step(conversation, WizardStep::AwaitingDeviceType);
        self.send(
            conversation,
            Reply::text(prompts::SELECT_DEVICE_TYPE).with_keyboard(DeviceType::keyboard()),
        )
        .await
    }

    /// Handles any other text message.
    ///
    /// Invalid input leaves the step unchanged. Manifest failures are
    /// reported to the user and then returned.
    pub async fn on_text(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), SepfinderError> {
        let step = self.step(conversation);
        debug!(conversation = %conversation, step = %step, "handling text");

        match step {
            WizardStep::Idle => {
                self.send(conversation, Reply::text(prompts::INVALID_STATE).remove_keyboard())
                    .await
            }
            WizardStep::AwaitingDeviceType => self.choose_device_type(conversation, text).await,
            WizardStep::AwaitingDeviceModel { devices } => {
                self.choose_device_model(conversation, &devices, text).await
            }
            WizardStep::AwaitingBoardConfig { device } => {
                self.choose_board_config(conversation, device, text).await
            }
            WizardStep::AwaitingFirmware {
                device,
                board_config,
            } => {
                self.choose_firmware(conversation, &device, &board_config, text)
                    .await
            }
        }
    }

    async fn choose_device_type(
        &self,
        conversation: &ConversationId,
        text: &str,
    ) -> Result<(), SepfinderError> {
        let Ok(device_type) = text.parse::<DeviceType>() else {
            return self.invalid_input(conversation).await;
        };

        let devices = match self.catalog.list_devices().await {
            Ok(devices) => devices,
            Err(e) => return self.catalog_unavailable(conversation, e).await,
        };

        let names: Vec<String> = devices
            .iter()
            .filter(|d| device_type.matches(d))
            .map(|d| d.name.clone())
            .collect();
        debug!(
            conversation = %conversation,
            %device_type,
            listed = devices.len(),
            matching = names.len(),
            "devices listed"
        );

        if names.is_empty() {
            self.reset(conversation);
            return self
                .send(conversation, Reply::text(prompts::NO_DEVICES).remove_keyboard())
                .await;
        }

        let keyboard = Keyboard::two_per_row(names);
        self.set_step(conversation, WizardStep::AwaitingDeviceModel { devices });
        self.send(
            conversation,
            Reply::text(prompts::SELECT_DEVICE).with_keyboard(keyboard),
        )
        .await
    }

    async fn choose_device_model(
        &self,
        conversation: &ConversationId,
        devices: &[DeviceSummary],
        text: &str,
    ) -> Result<(), SepfinderError> {
        let Some(summary) = devices.iter().find(|d| d.name == text) else {
            return self.invalid_input(conversation).await;
        };

        let device = match self.catalog.get_device_detail(&summary.identifier).await {
            Ok(device) => device,
            Err(e) => return self.catalog_unavailable(conversation, e).await,
        };

        let boards: Vec<String> = device
            .eligible_boards()
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(
            conversation = %conversation,
            identifier = summary.identifier.as_str(),
            boards = boards.len(),
            "device selected"
        );

        if boards.is_empty() {
            return self
                .send(conversation, Reply::text(prompts::NO_BOARD_CONFIGS))
                .await;
        }

        if let [only] = boards.as_slice() {
            let board_config = only.clone();
            return self
                .present_firmwares(conversation, device, board_config)
                .await;
        }

        self.set_step(conversation, WizardStep::AwaitingBoardConfig { device });
        self.send(
            conversation,
            Reply::text(prompts::SELECT_BOARD_CONFIG).with_keyboard(Keyboard::two_per_row(boards)),
        )
        .await
    }

    async fn choose_board_config(
        &self,
        conversation: &ConversationId,
        device: DeviceDetail,
        text: &str,
    ) -> Result<(), SepfinderError> {
        if !sepfinder_catalog::is_device_board(text) {
            return self.invalid_input(conversation).await;
        }
        self.present_firmwares(conversation, device, text.to_string())
            .await
    }

    /// Offers the signed firmwares of `device`, or ends the wizard if there are none.
    async fn present_firmwares(
        &self,
        conversation: &ConversationId,
        device: DeviceDetail,
        board_config: String,
    ) -> Result<(), SepfinderError> {
        let versions: Vec<String> = device
            .signed_firmwares()
            .map(|f| f.version.clone())
            .collect();

        if versions.is_empty() {
            self.reset(conversation);
            return self
                .send(
                    conversation,
                    Reply::text(prompts::NO_SIGNED_FIRMWARES).remove_keyboard(),
                )
                .await;
        }

        debug!(conversation = %conversation, board_config = board_config.as_str(), "board selected");
        self.set_step(
            conversation,
            WizardStep::AwaitingFirmware {
                device,
                board_config,
            },
        );
        self.send(
            conversation,
            Reply::text(prompts::SELECT_VERSION).with_keyboard(Keyboard::two_per_row(versions)),
        )
        .await
    }

    async fn choose_firmware(
        &self,
        conversation: &ConversationId,
        device: &DeviceDetail,
        board_config: &str,
        text: &str,
    ) -> Result<(), SepfinderError> {
        let Some(firmware) = device.firmware_by_version(text) else {
            return self.invalid_input(conversation).await;
        };

        info!(
            conversation = %conversation,
            identifier = device.identifier.as_str(),
            board_config,
            version = firmware.version.as_str(),
            build_id = firmware.build_id.as_str(),
            "resolving components"
        );

        let progress = TypingProgress {
            shell: self.shell.as_ref(),
            conversation,
        };
        let outcome = match self.resolver.resolve(firmware, &progress).await {
            Ok(manifest) => find_components(&manifest, board_config),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(paths) => {
                self.reset(conversation);
                let report = format_report(&device.name, board_config, firmware, &paths);
                self.send(conversation, Reply::html(report).remove_keyboard())
                    .await
            }
            Err(e) => {
                self.send(conversation, Reply::text(prompts::resolution_failure(&e)))
                    .await?;
                Err(e)
            }
        }
    }

    async fn invalid_input(&self, conversation: &ConversationId) -> Result<(), SepfinderError> {
        self.send(conversation, Reply::text(prompts::INVALID_INPUT))
            .await
    }

    async fn catalog_unavailable(
        &self,
        conversation: &ConversationId,
        err: SepfinderError,
    ) -> Result<(), SepfinderError> {
        warn!(conversation = %conversation, error = %err, "catalog request failed");
        self.send(conversation, Reply::text(prompts::CATALOG_UNAVAILABLE))
            .await
    }

    fn set_step(&self, conversation: &ConversationId, step: WizardStep) {
        self.sessions.insert(conversation.clone(), step);
    }

    fn reset(&self, conversation: &ConversationId) {
        self.sessions.remove(conversation);
    }

    async fn send(&self, conversation: &ConversationId, reply: Reply) -> Result<(), SepfinderError> {
        self.shell.send(conversation, reply).await
    }
}

/// Tells the user an extraction is running and keeps the typing indicator up.
struct TypingProgress<'a> {
    shell: &'a dyn ChatShell,
    conversation: &'a ConversationId,
}

#[async_trait]
impl ExtractionProgress for TypingProgress<'_> {
    async fn extraction_started(&self) {
        if let Err(e) = self
            .shell
            .send(self.conversation, Reply::text(prompts::EXTRACTING))
            .await
        {
            warn!(conversation = %self.conversation, error = %e, "failed to send extraction notice");
        }
    }

    async fn still_working(&self) {
        if let Err(e) = self.shell.send_typing(self.conversation).await {
            debug!(conversation = %self.conversation, error = %e, "failed to send typing indicator");
        }
    }
}

//! Event-driven form session: field edits and submit presses arrive as
//! commands, the relay call runs as its own task, and every state change is
//! published as a [`FormSnapshot`].

use std::sync::Arc;

use anyhow::{anyhow, Result};
use shared::domain::FieldName;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::debug;

use crate::{ContactFormController, FormSnapshot, SubmissionGateway, SubmitStart};

const COMMAND_QUEUE_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    SetField { field: FieldName, value: String },
    Submit,
}

/// Drives `controller` until `commands` closes and no send is outstanding,
/// then returns it.
pub async fn run_session(
    mut controller: ContactFormController,
    gateway: Arc<dyn SubmissionGateway>,
    mut commands: mpsc::Receiver<FormCommand>,
    updates: watch::Sender<FormSnapshot>,
) -> ContactFormController {
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Result<()>>(1);
    let mut commands_open = true;
    updates.send_replace(controller.snapshot());

    while commands_open || controller.is_sending() {
        tokio::select! {
            cmd = commands.recv(), if commands_open => match cmd {
                Some(FormCommand::SetField { field, value }) => controller.set_field(field, value),
                Some(FormCommand::Submit) => {
                    if let SubmitStart::Dispatch(payload) = controller.begin_submit() {
                        let gateway = Arc::clone(&gateway);
                        let outcome_tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let send = tokio::spawn(async move { gateway.send(&payload).await });
                            let outcome = match send.await {
                                Ok(outcome) => outcome,
                                Err(err) => Err(anyhow!("relay task panicked: {err}")),
                            };
                            let _ = outcome_tx.send(outcome).await;
                        });
                    }
                }
                None => {
                    debug!("form session: command channel closed");
                    commands_open = false;
                }
            },
            Some(outcome) = outcome_rx.recv() => {
                controller.complete_submit(outcome);
            }
        }
        updates.send_replace(controller.snapshot());
    }

    controller
}

pub struct SessionHandle {
    commands: mpsc::Sender<FormCommand>,
    updates: watch::Receiver<FormSnapshot>,
}

impl SessionHandle {
    pub async fn set_field(&self, field: FieldName, value: impl Into<String>) -> Result<()> {
        self.send(FormCommand::SetField {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn submit(&self) -> Result<()> {
        self.send(FormCommand::Submit).await
    }

    pub fn current(&self) -> FormSnapshot {
        self.updates.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.updates.clone()
    }

    /// Waits until a published snapshot satisfies `pred`.
    pub async fn wait_for(
        &mut self,
        mut pred: impl FnMut(&FormSnapshot) -> bool,
    ) -> Result<FormSnapshot> {
        let snapshot = self
            .updates
            .wait_for(|snapshot| pred(snapshot))
            .await
            .map_err(|_| anyhow!("form session ended"))?;
        Ok(snapshot.clone())
    }

    async fn send(&self, cmd: FormCommand) -> Result<()> {
        self.commands
            .send(cmd)
            .await
            .map_err(|_| anyhow!("form session ended"))
    }
}

/// Spawns [`run_session`] on the current runtime. Dropping the handle closes
/// the command channel; the task finishes once any in-flight send resolves.
pub fn spawn_session(
    controller: ContactFormController,
    gateway: Arc<dyn SubmissionGateway>,
) -> (SessionHandle, JoinHandle<ContactFormController>) {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
    let (update_tx, update_rx) = watch::channel(controller.snapshot());
    let task = tokio::spawn(run_session(controller, gateway, cmd_rx, update_tx));
    (
        SessionHandle {
            commands: cmd_tx,
            updates: update_rx,
        },
        task,
    )
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

//! Layout service: owns the current layout snapshot.
//!
//! Every use-case that changes the snapshot holds the write guard across
//! compute-and-replace, so UI edits and commands are applied one at a time
//! and never against a stale snapshot.

use tokio::sync::RwLock;

use aurahome_domain::command::interpret;
use aurahome_domain::device::{Device, DeviceChanges};
use aurahome_domain::error::{HomeError, NotFoundError, ValidationError};
use aurahome_domain::event::{Event, EventKind};
use aurahome_domain::id::DeviceId;
use aurahome_domain::layout::{HomeLayout, update_device};

use crate::ports::EventPublisher;

/// Result of running one command against the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandReport {
    /// Whether any device changed.
    pub matched: bool,
    /// Devices that received a change.
    pub changed: Vec<DeviceId>,
    /// The snapshot after the command (the previous one when unmatched).
    pub layout: HomeLayout,
}

/// Application service holding the single source of truth for the layout.
pub struct LayoutService<P> {
    snapshot: RwLock<Option<HomeLayout>>,
    publisher: P,
}

impl<P: EventPublisher + Send + Sync> LayoutService<P> {
    /// Create a service with no layout loaded yet.
    pub fn new(publisher: P) -> Self {
        Self {
            snapshot: RwLock::new(None),
            publisher,
        }
    }

    /// Replace the current snapshot with `layout` after normalizing and
    /// validating it.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] if the layout breaks an invariant;
    /// the previous snapshot is kept in that case.
    #[tracing::instrument(skip_all, fields(rooms = layout.rooms.len()))]
    pub async fn load_layout(&self, layout: HomeLayout) -> Result<HomeLayout, HomeError> {
        let layout = layout.normalized();
        layout.validate()?;

        let mut guard = self.snapshot.write().await;
        *guard = Some(layout.clone());
        tracing::info!(devices = layout.device_count(), "layout loaded");
        self.emit(EventKind::LayoutLoaded {
            rooms: layout.rooms.len(),
            devices: layout.device_count(),
        })
        .await;
        Ok(layout)
    }

    /// Clone of the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NoLayout`] when nothing has been loaded.
    pub async fn current_layout(&self) -> Result<HomeLayout, HomeError> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .cloned()
            .ok_or(HomeError::NoLayout)
    }

    /// Look up a device by id in the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NoLayout`] when nothing has been loaded, or
    /// [`HomeError::NotFound`] for an unknown id.
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device, HomeError> {
        let guard = self.snapshot.read().await;
        let layout = guard.as_ref().ok_or(HomeError::NoLayout)?;
        layout.find_device(id).cloned().ok_or_else(|| not_found(id))
    }

    /// Apply a field-level edit to one device and publish the new snapshot.
    ///
    /// An edit that leaves the layout unchanged publishes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NoLayout`], [`HomeError::NotFound`] for an
    /// unknown id, or [`HomeError::Validation`] if the edit would produce an
    /// invalid device (out-of-range brightness, malformed color).
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_device(
        &self,
        id: &DeviceId,
        changes: DeviceChanges,
    ) -> Result<Device, HomeError> {
        self.edit_device(id, |_| Ok(changes)).await
    }

    /// Flip the power state of a toggleable device.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NoLayout`], [`HomeError::NotFound`], or
    /// [`ValidationError::NotToggleable`] for cameras and thermostats.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_device(&self, id: &DeviceId) -> Result<Device, HomeError> {
        self.edit_device(id, |device| {
            if !device.kind.is_toggleable() {
                return Err(ValidationError::NotToggleable(device.id.clone()).into());
            }
            Ok(DeviceChanges::state(device.toggled_state()))
        })
        .await
    }

    /// Interpret `utterance` against the snapshot, replacing it only when
    /// the command matched.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NoLayout`] when nothing has been loaded. An
    /// utterance that matches nothing is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn handle_command(&self, utterance: &str) -> Result<CommandReport, HomeError> {
        let mut guard = self.snapshot.write().await;
        let current = guard.as_ref().ok_or(HomeError::NoLayout)?;

        let interpretation = interpret(utterance, current);
        if !interpretation.matched() {
            tracing::debug!("command matched no device");
            let layout = current.clone();
            self.emit(EventKind::CommandIgnored {
                utterance: utterance.to_string(),
            })
            .await;
            return Ok(CommandReport {
                matched: false,
                changed: Vec::new(),
                layout,
            });
        }

        tracing::info!(changed = ?interpretation.changed, "command applied");
        *guard = Some(interpretation.layout.clone());
        self.emit(EventKind::CommandApplied {
            utterance: utterance.to_string(),
            changed: interpretation.changed.clone(),
        })
        .await;
        Ok(CommandReport {
            matched: true,
            changed: interpretation.changed,
            layout: interpretation.layout,
        })
    }

    async fn edit_device<F>(&self, id: &DeviceId, changes_for: F) -> Result<Device, HomeError>
    where
        F: FnOnce(&Device) -> Result<DeviceChanges, HomeError>,
    {
        let mut guard = self.snapshot.write().await;
        let current = guard.as_ref().ok_or(HomeError::NoLayout)?;
        let device = current.find_device(id).ok_or_else(|| not_found(id))?;

        let changes = changes_for(device)?;
        let next = update_device(current, id, &changes);
        next.validate()?;

        let updated = next.find_device(id).cloned().ok_or_else(|| not_found(id))?;
        if next == *current {
            tracing::debug!("edit left device unchanged");
            return Ok(updated);
        }
        *guard = Some(next);
        tracing::debug!(state = %updated.state, "device updated");
        self.emit(EventKind::DeviceUpdated {
            device_id: id.clone(),
        })
        .await;
        Ok(updated)
    }

    async fn emit(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)).await {
            tracing::warn!(%err, "failed to publish layout event");
        }
    }
}

fn not_found(id: &DeviceId) -> HomeError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurahome_domain::device::{DeviceState, DeviceType};
    use aurahome_domain::palette::Brightness;
    use aurahome_domain::room::Room;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingPublisher {
        events: Mutex<Vec<EventKind>>,
    }

    impl RecordingPublisher {
        fn kinds(&self) -> Vec<EventKind> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventPublisher for RecordingPublisher {
        fn publish(&self, event: Event) -> impl Future<Output = Result<(), HomeError>> + Send {
            self.events.lock().unwrap().push(event.kind);
            async { Ok(()) }
        }
    }

    fn home() -> HomeLayout {
        HomeLayout::new(vec![
            Room::new("Living Room")
                .spanning(2, 6)
                .with_device(Device::light(
                    "lr-1",
                    "Main Light",
                    Brightness::MAX,
                    "#FFFFFF",
                ))
                .with_device(Device::new("lr-2", "Camera", DeviceType::Camera)),
            Room::new("Kitchen")
                .at(1, 7)
                .with_device(Device::new("k-1", "Switch", DeviceType::Switch)),
        ])
    }

    async fn loaded_service() -> LayoutService<RecordingPublisher> {
        let svc = LayoutService::new(RecordingPublisher::default());
        svc.load_layout(home()).await.unwrap();
        svc
    }

    #[tokio::test]
    async fn should_report_no_layout_before_load() {
        let svc = LayoutService::new(RecordingPublisher::default());
        assert!(matches!(
            svc.current_layout().await,
            Err(HomeError::NoLayout)
        ));
        assert!(matches!(
            svc.handle_command("turn on kitchen switch").await,
            Err(HomeError::NoLayout)
        ));
    }

    #[tokio::test]
    async fn should_publish_layout_loaded_with_counts() {
        let svc = loaded_service().await;
        assert_eq!(
            svc.publisher.kinds(),
            vec![EventKind::LayoutLoaded {
                rooms: 2,
                devices: 3
            }]
        );
    }

    #[tokio::test]
    async fn should_reject_invalid_layout_and_keep_previous() {
        let svc = loaded_service().await;
        let bad = HomeLayout::new(vec![Room::new("Attic").at(1, 14)]);

        let result = svc.load_layout(bad).await;
        assert!(matches!(result, Err(HomeError::Validation(_))));
        assert_eq!(svc.current_layout().await.unwrap(), home());
    }

    #[tokio::test]
    async fn should_normalize_layout_on_load() {
        let svc = LayoutService::new(RecordingPublisher::default());
        let layout = HomeLayout::new(vec![
            Room::new("Den").with_device(Device::new("l-1", "Lamp", DeviceType::Light)),
        ]);
        let loaded = svc.load_layout(layout).await.unwrap();
        let lamp = loaded.find_device(&DeviceId::from("l-1")).unwrap();
        assert_eq!(lamp.brightness, Some(Brightness::MAX));
    }

    #[tokio::test]
    async fn should_update_device_fields() {
        let svc = loaded_service().await;
        let id = DeviceId::from("lr-1");
        let changes = DeviceChanges {
            brightness: Some(Brightness::clamped(25)),
            ..DeviceChanges::default()
        };

        let updated = svc.update_device(&id, changes).await.unwrap();
        assert_eq!(updated.brightness, Some(Brightness::clamped(25)));
        assert_eq!(svc.get_device(&id).await.unwrap(), updated);
        assert_eq!(
            svc.publisher.kinds().last(),
            Some(&EventKind::DeviceUpdated { device_id: id })
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let svc = loaded_service().await;
        let result = svc
            .update_device(&DeviceId::from("nope"), DeviceChanges::state(DeviceState::ON))
            .await;
        assert!(matches!(result, Err(HomeError::NotFound(_))));
        assert_eq!(svc.current_layout().await.unwrap(), home());
    }

    #[tokio::test]
    async fn should_reject_malformed_color_edit() {
        let svc = loaded_service().await;
        let changes = DeviceChanges {
            color: Some("blue".to_string()),
            ..DeviceChanges::default()
        };
        let result = svc.update_device(&DeviceId::from("lr-1"), changes).await;
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::InvalidColor { .. }))
        ));
    }

    #[tokio::test]
    async fn should_reject_free_text_state_on_light() {
        let svc = loaded_service().await;
        let result = svc
            .update_device(
                &DeviceId::from("lr-1"),
                DeviceChanges::state(DeviceState::Text("dimmed".to_string())),
            )
            .await;
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::StateNotBinary(_)))
        ));
        assert_eq!(svc.current_layout().await.unwrap(), home());
    }

    #[tokio::test]
    async fn should_not_publish_when_edit_changes_nothing() {
        let svc = loaded_service().await;
        let before = svc.publisher.kinds().len();
        let changes = DeviceChanges {
            brightness: Some(Brightness::clamped(10)),
            ..DeviceChanges::default()
        };

        let switch = svc.update_device(&DeviceId::from("k-1"), changes).await.unwrap();
        assert!(switch.brightness.is_none());
        assert_eq!(svc.publisher.kinds().len(), before);
        assert_eq!(svc.current_layout().await.unwrap(), home());
    }

    #[tokio::test]
    async fn should_toggle_switch_on_then_off() {
        let svc = loaded_service().await;
        let id = DeviceId::from("k-1");
        assert!(svc.toggle_device(&id).await.unwrap().is_on());
        assert!(!svc.toggle_device(&id).await.unwrap().is_on());
    }

    #[tokio::test]
    async fn should_refuse_to_toggle_camera() {
        let svc = loaded_service().await;
        let result = svc.toggle_device(&DeviceId::from("lr-2")).await;
        assert!(matches!(
            result,
            Err(HomeError::Validation(ValidationError::NotToggleable(_)))
        ));
    }

    #[tokio::test]
    async fn should_replace_snapshot_when_command_matches() {
        let svc = loaded_service().await;
        let report = svc
            .handle_command("turn on living room main light and set to blue")
            .await
            .unwrap();

        assert!(report.matched);
        assert_eq!(report.changed, vec![DeviceId::from("lr-1")]);
        let light = svc.get_device(&DeviceId::from("lr-1")).await.unwrap();
        assert!(light.is_on());
        assert_eq!(light.color.as_deref(), Some("#0074D9"));
        assert_eq!(report.layout, svc.current_layout().await.unwrap());
    }

    #[tokio::test]
    async fn should_keep_snapshot_when_command_is_unmatched() {
        let svc = loaded_service().await;
        let report = svc.handle_command("make me a sandwich").await.unwrap();

        assert!(!report.matched);
        assert_eq!(report.layout, home());
        assert_eq!(svc.current_layout().await.unwrap(), home());
        assert_eq!(
            svc.publisher.kinds().last(),
            Some(&EventKind::CommandIgnored {
                utterance: "make me a sandwich".to_string()
            })
        );
    }

    #[tokio::test]
    async fn should_apply_commands_and_edits_in_sequence() {
        let svc = loaded_service().await;
        let id = DeviceId::from("lr-1");

        svc.handle_command("living room main light brightness to 40")
            .await
            .unwrap();
        svc.update_device(
            &id,
            DeviceChanges {
                color: Some("#39CCCC".to_string()),
                ..DeviceChanges::default()
            },
        )
        .await
        .unwrap();

        let light = svc.get_device(&id).await.unwrap();
        assert_eq!(light.brightness, Some(Brightness::clamped(40)));
        assert_eq!(light.color.as_deref(), Some("#39CCCC"));
        assert!(light.is_on());
    }
}

//! Reactive application state for area editing and browsing.
//!
//! DESIGN
//! ======
//! `AppStateStore` composes the mode machine, the draft polygon, the
//! area repository, and the place-search resolver into one unit of
//! truth. Every state slot is a watch channel: mutation methods run to
//! completion and then publish, so subscribers never observe a partial
//! update. The store assumes a single logical owner — all mutations
//! arrive from one event-driven context — and needs no locking beyond
//! the mode controller's mutex.
//!
//! A background task mirrors the repository's live row feed into the
//! decoded area list for as long as the store lives.
//!
//! ERROR HANDLING
//! ==============
//! Collaborator failures never escape: a failed insert or delete leaves
//! state untouched and logs a warning, a failed search resolves to "not
//! found", and a corrupt persisted payload lists its area with an empty
//! point sequence. Validation failures (saving with too few points or a
//! blank name) are silent no-ops; callers pre-check via the exposed
//! draft and name state.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::camera::{self, CameraDirective};
use crate::codec;
use crate::consts::MIN_AREA_POINTS;
use crate::draft::DraftPolygon;
use crate::geo::GeoPoint;
use crate::mode::{Mode, ModeController, Transition};
use crate::services::areas::{AreaRecord, AreaRepository};
use crate::services::search::SearchResolver;

// =============================================================================
// TYPES
// =============================================================================

/// A persisted area decoded for presentation: the repository row with its
/// point sequence already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    /// Repository-assigned unique id.
    pub id: i64,
    /// User-chosen name.
    pub name: String,
    /// Polygon vertices in drawn order. Empty when the persisted payload
    /// was corrupt; such an area stays listed and deletable but renders
    /// as nothing.
    pub points: Vec<GeoPoint>,
}

/// Transient presentation flags: dialog visibility, text buffers, and the
/// delete-confirmation target. None of this survives the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiFlags {
    /// The saved-areas dropdown is open.
    pub show_areas_list: bool,
    /// The save-area dialog is open.
    pub show_save_dialog: bool,
    /// The delete-confirmation dialog is open.
    pub show_delete_dialog: bool,
    /// The one-shot drawing instruction notice is visible.
    pub show_instruction_toast: bool,
    /// Text buffer of the save dialog's name field.
    pub area_name: String,
    /// Text buffer of the search bar.
    pub search_query: String,
    /// Area id the delete-confirmation dialog refers to.
    pub pending_delete: Option<i64>,
}

// =============================================================================
// STORE
// =============================================================================

/// The orchestrating state container exposed to the presentation layer.
pub struct AppStateStore {
    repo: Arc<dyn AreaRepository>,
    resolver: Arc<dyn SearchResolver>,
    controller: Mutex<ModeController>,
    /// Monotonic token distinguishing in-flight search requests.
    search_seq: AtomicU64,
    mode_tx: watch::Sender<Mode>,
    draft_tx: watch::Sender<DraftPolygon>,
    areas_rx: watch::Receiver<Vec<Area>>,
    selected_tx: watch::Sender<Option<i64>>,
    location_tx: watch::Sender<Option<GeoPoint>>,
    search_tx: watch::Sender<Option<GeoPoint>>,
    camera_tx: watch::Sender<CameraDirective>,
    ui_tx: watch::Sender<UiFlags>,
    rows_task: JoinHandle<()>,
}

impl AppStateStore {
    /// Build the store over its two collaborators and start mirroring the
    /// repository's live row feed.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(repo: Arc<dyn AreaRepository>, resolver: Arc<dyn SearchResolver>) -> Self {
        let (areas_tx, areas_rx) = watch::channel(Vec::new());
        let mut rows_rx = repo.watch_rows();
        let rows_task = tokio::spawn(async move {
            loop {
                let rows = rows_rx.borrow_and_update().clone();
                let decoded = decode_rows(&rows);
                areas_tx.send_if_modified(|current| {
                    if *current == decoded {
                        false
                    } else {
                        *current = decoded;
                        true
                    }
                });
                if rows_rx.changed().await.is_err() {
                    break;
                }
            }
        });

        Self {
            repo,
            resolver,
            controller: Mutex::new(ModeController::new()),
            search_seq: AtomicU64::new(0),
            mode_tx: watch::channel(Mode::Viewing).0,
            draft_tx: watch::channel(DraftPolygon::new()).0,
            areas_rx,
            selected_tx: watch::channel(None).0,
            location_tx: watch::channel(None).0,
            search_tx: watch::channel(None).0,
            camera_tx: watch::channel(CameraDirective::NoOp).0,
            ui_tx: watch::channel(UiFlags::default()).0,
            rows_task,
        }
    }

    // ── Observables ─────────────────────────────────────────────

    pub fn watch_mode(&self) -> watch::Receiver<Mode> {
        self.mode_tx.subscribe()
    }

    pub fn watch_draft(&self) -> watch::Receiver<DraftPolygon> {
        self.draft_tx.subscribe()
    }

    pub fn watch_areas(&self) -> watch::Receiver<Vec<Area>> {
        self.areas_rx.clone()
    }

    pub fn watch_selected_area(&self) -> watch::Receiver<Option<i64>> {
        self.selected_tx.subscribe()
    }

    pub fn watch_selected_location(&self) -> watch::Receiver<Option<GeoPoint>> {
        self.location_tx.subscribe()
    }

    pub fn watch_search_result(&self) -> watch::Receiver<Option<GeoPoint>> {
        self.search_tx.subscribe()
    }

    pub fn watch_camera(&self) -> watch::Receiver<CameraDirective> {
        self.camera_tx.subscribe()
    }

    pub fn watch_ui(&self) -> watch::Receiver<UiFlags> {
        self.ui_tx.subscribe()
    }

    // ── Snapshots ───────────────────────────────────────────────

    #[must_use]
    pub fn mode(&self) -> Mode {
        *self.mode_tx.borrow()
    }

    /// Draft vertices in drawn order.
    #[must_use]
    pub fn draft_points(&self) -> Vec<GeoPoint> {
        self.draft_tx.borrow().points().to_vec()
    }

    /// Number of draft vertices; the save gate requires at least
    /// [`MIN_AREA_POINTS`].
    #[must_use]
    pub fn draft_len(&self) -> usize {
        self.draft_tx.borrow().len()
    }

    #[must_use]
    pub fn areas(&self) -> Vec<Area> {
        self.areas_rx.borrow().clone()
    }

    #[must_use]
    pub fn selected_area_id(&self) -> Option<i64> {
        *self.selected_tx.borrow()
    }

    /// The selected area, re-derived from the live list on each read. The
    /// selection holds only an id, so a deleted area can never be kept
    /// alive by it.
    #[must_use]
    pub fn selected_area(&self) -> Option<Area> {
        let id = (*self.selected_tx.borrow())?;
        self.area_by_id(id)
    }

    #[must_use]
    pub fn search_result(&self) -> Option<GeoPoint> {
        *self.search_tx.borrow()
    }

    #[must_use]
    pub fn ui(&self) -> UiFlags {
        self.ui_tx.borrow().clone()
    }

    // ── Gestures ────────────────────────────────────────────────

    /// Route a map tap by the current mode: toggle a draft vertex while
    /// drawing, set the transient raw location while viewing.
    pub fn handle_map_tap(&self, point: GeoPoint) {
        match self.mode() {
            Mode::Drawing => self.toggle_draft_point(point),
            Mode::Viewing => self.select_location(point),
        }
    }

    /// Toggle a draft vertex: erase the first vertex near `point`, or
    /// append `point` when none is near.
    pub fn toggle_draft_point(&self, point: GeoPoint) {
        self.draft_tx.send_modify(|draft| draft.toggle(point));
    }

    /// Set the transient viewing-mode tap location.
    pub fn select_location(&self, point: GeoPoint) {
        self.location_tx.send_replace(Some(point));
    }

    /// Discard every draft vertex.
    pub fn clear_draft(&self) {
        self.draft_tx.send_modify(DraftPolygon::clear);
    }

    // ── Mode ────────────────────────────────────────────────────

    pub fn enter_drawing(&self) {
        let transition = self.lock_controller().enter_drawing();
        self.apply_transition(transition);
    }

    /// Leave drawing mode, discarding the draft.
    pub fn exit_drawing(&self) {
        let transition = self.lock_controller().exit_drawing();
        self.apply_transition(transition);
    }

    pub fn toggle_drawing_mode(&self) {
        let transition = self.lock_controller().toggle();
        self.apply_transition(transition);
    }

    fn lock_controller(&self) -> MutexGuard<'_, ModeController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_transition(&self, transition: Transition) {
        if !transition.changed {
            return;
        }
        if transition.clear_draft {
            self.draft_tx.send_modify(DraftPolygon::clear);
        }
        self.mode_tx.send_replace(transition.mode);
        if transition.show_instruction {
            self.ui_tx.send_modify(|ui| ui.show_instruction_toast = true);
        }
        if transition.mode == Mode::Viewing {
            self.ui_tx.send_modify(|ui| ui.show_instruction_toast = false);
        }
    }

    // ── Areas ───────────────────────────────────────────────────

    /// Persist the draft as a named area, then clear the draft and return
    /// to viewing mode.
    ///
    /// A draft with fewer than [`MIN_AREA_POINTS`] vertices or a blank
    /// name makes this a no-op. A repository failure leaves the draft and
    /// mode untouched.
    pub async fn save_area(&self, name: &str) {
        let points = self.draft_points();
        if points.len() < MIN_AREA_POINTS || name.trim().is_empty() {
            return;
        }

        let encoded = codec::encode_points(&points);
        match self.repo.insert(name, &encoded).await {
            Ok(id) => {
                info!(id, vertices = points.len(), "area saved");
                self.draft_tx.send_modify(DraftPolygon::clear);
                let transition = self.lock_controller().exit_drawing();
                self.apply_transition(transition);
            }
            Err(e) => warn!(error = %e, "area insert failed"),
        }
    }

    /// Delete a persisted area. Deleting the selected area also clears
    /// the selection. A repository failure leaves state untouched.
    pub async fn delete_area(&self, id: i64) {
        match self.repo.delete(id).await {
            Ok(()) => {
                info!(id, "area deleted");
                if *self.selected_tx.borrow() == Some(id) {
                    self.selected_tx.send_replace(None);
                }
            }
            Err(e) => warn!(error = %e, id, "area delete failed"),
        }
    }

    /// Select an area and publish a camera directive framing its points.
    /// An unknown id or a corrupt point payload moves the selection but
    /// leaves the camera alone.
    pub fn select_area(&self, id: i64) {
        self.selected_tx.send_replace(Some(id));
        if let Some(area) = self.area_by_id(id) {
            let directive = camera::fit_points(&area.points);
            if directive != CameraDirective::NoOp {
                self.camera_tx.send_replace(directive);
            }
        }
    }

    pub fn clear_selected_area(&self) {
        self.selected_tx.send_replace(None);
    }

    fn area_by_id(&self, id: i64) -> Option<Area> {
        self.areas_rx.borrow().iter().find(|a| a.id == id).cloned()
    }

    // ── Search ──────────────────────────────────────────────────

    /// Resolve a free-text query to a coordinate and publish it along
    /// with a camera directive centering on it.
    ///
    /// A blank query resets the result without invoking the resolver.
    /// When requests overlap, the latest-issued one owns the result
    /// slot; completions of older requests are dropped.
    pub async fn search_place(&self, query: &str) {
        if query.trim().is_empty() {
            self.search_tx.send_replace(None);
            return;
        }

        let token = self.search_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.resolver.resolve(query).await;
        if self.search_seq.load(Ordering::SeqCst) != token {
            return;
        }

        self.search_tx.send_replace(result);
        if let Some(point) = result {
            info!(latitude = point.latitude, longitude = point.longitude, "place found");
            self.camera_tx.send_replace(camera::fit_points(&[point]));
        }
    }

    pub fn clear_search_result(&self) {
        self.search_tx.send_replace(None);
    }

    // ── UI flags ────────────────────────────────────────────────

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.ui_tx.send_modify(|ui| ui.search_query = query);
    }

    pub fn set_area_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.ui_tx.send_modify(|ui| ui.area_name = name);
    }

    pub fn set_show_areas_list(&self, show: bool) {
        self.ui_tx.send_modify(|ui| ui.show_areas_list = show);
    }

    pub fn set_show_save_dialog(&self, show: bool) {
        self.ui_tx.send_modify(|ui| ui.show_save_dialog = show);
    }

    pub fn set_show_delete_dialog(&self, show: bool) {
        self.ui_tx.send_modify(|ui| ui.show_delete_dialog = show);
    }

    pub fn set_pending_delete(&self, id: Option<i64>) {
        self.ui_tx.send_modify(|ui| ui.pending_delete = id);
    }

    pub fn dismiss_instruction_toast(&self) {
        self.ui_tx.send_modify(|ui| ui.show_instruction_toast = false);
    }
}

impl Drop for AppStateStore {
    fn drop(&mut self) {
        self.rows_task.abort();
    }
}

fn decode_rows(rows: &[AreaRecord]) -> Vec<Area> {
    rows.iter()
        .map(|row| Area {
            id: row.id,
            name: row.name.clone(),
            points: codec::decode_points(&row.points_json),
        })
        .collect()
}

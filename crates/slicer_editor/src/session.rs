use nalgebra::{vector, Point2, Vector2};
use serde::{Deserialize, Serialize};
use slicer_collections::{RectCollection, Snapshot, SpriteRecord, UndoStack};
use slicer_events::Events;
use slicer_geometry::Rect;
use slicer_input::{ButtonAction, InputEvent, PointerButton};
use smart_default::SmartDefault;

use crate::{apply_resize, hit_handle, CoordinateMapping, CursorShape, Handle};

/// Handles never shrink below this many screen pixels, however far the
/// camera zooms in.
pub const MIN_HANDLE_PIXELS: f32 = 2.;

#[derive(SmartDefault, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// When false, every input event is ignored.
    #[default(true)]
    pub enabled: bool,
    /// Smallest width or height, in image pixels, a drawn or resized
    /// rectangle may have.
    #[default(1.)]
    pub min_size: f32,
    /// Size of a resize handle in screen pixels.
    #[default(4.)]
    pub handle_pixels: f32,
}

/// What the pointer is currently doing.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Drawing a new rectangle. Points are in local space.
    Dragging {
        start: Point2<f32>,
        current: Point2<f32>,
    },
    /// Dragging a handle of the rectangle at `index`. `start_rect` is the
    /// rectangle as it was when the gesture began.
    Resizing {
        index: usize,
        handle: Handle,
        start_rect: Rect,
    },
}

/// Side effects of handling one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum EditEffect {
    /// The persisted rectangle list changed; carries the full new list.
    Changed(Vec<Rect>),
    /// Something visible changed and the surface should be repainted.
    Redraw,
    /// The pointer hovers a different kind of zone.
    Cursor(CursorShape),
}

/// Receives the rectangle list every time an edit is committed.
pub trait ChangeSink {
    fn rects_changed(&mut self, rects: &[Rect]);
}

impl<F: FnMut(&[Rect])> ChangeSink for F {
    fn rects_changed(&mut self, rects: &[Rect]) {
        self(rects)
    }
}

/// Forwards every `Changed` effect to `sink`.
pub fn notify_changes(effects: &Events<EditEffect>, sink: &mut impl ChangeSink) {
    for effect in effects.iter() {
        if let EditEffect::Changed(rects) = effect {
            sink.rects_changed(rects);
        }
    }
}

/// The interactive rectangle editor.
///
/// Owns the sprite rectangles, the selection and the undo history, and turns
/// pointer and key events into edits. It knows nothing about drawing: a
/// renderer reads [`EditSession::sprites`], [`EditSession::selected`] and
/// [`EditSession::drag_preview`] and repaints on [`EditEffect::Redraw`].
#[derive(Debug, Default)]
pub struct EditSession {
    settings: EditSettings,
    sprites: RectCollection,
    history: UndoStack<Snapshot>,
    selected: Option<usize>,
    gesture: Gesture,
    cursor: CursorShape,
}

impl EditSession {
    pub fn new(settings: EditSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// Turns manual editing on or off. Disabling mid-resize keeps the
    /// rectangle as it is and commits it.
    pub fn set_enabled(&mut self, enabled: bool) -> Events<EditEffect> {
        let mut effects = Events::default();
        self.settings.enabled = enabled;
        if !enabled {
            if let Gesture::Resizing { .. } = std::mem::take(&mut self.gesture) {
                self.notify(&mut effects);
            }
        }
        effects
    }

    pub fn sprites(&self) -> &RectCollection {
        &self.sprites
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<SpriteRecord> {
        self.selected.and_then(|i| self.sprites.get(i))
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Replaces every rectangle, e.g. after an auto-slice or an import.
    ///
    /// Selection, history and any gesture in progress are dropped; the id
    /// counter restarts after the largest id given.
    pub fn set_sprites(&mut self, records: impl IntoIterator<Item = SpriteRecord>) {
        self.sprites.replace(records);
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.history.clear();
    }

    pub fn clear(&mut self) {
        self.set_sprites(Vec::new());
    }

    /// The rectangle being drawn, in image space, clipped to the image.
    pub fn drag_preview(&self, mapping: &dyn CoordinateMapping) -> Option<Rect> {
        match self.gesture {
            Gesture::Dragging { start, current } => drag_to_image_rect(start, current, mapping),
            _ => None,
        }
    }

    /// Handles one input event. `mapping` is `None` while no image is
    /// loaded, in which case the event is ignored.
    pub fn update(
        &mut self,
        event: &InputEvent,
        mapping: Option<&dyn CoordinateMapping>,
    ) -> Events<EditEffect> {
        let mut effects = Events::default();

        let Some(mapping) = mapping.filter(|m| m.has_image()) else {
            return effects;
        };
        if !self.settings.enabled {
            return effects;
        }

        if event.is_undo() {
            self.undo(&mut effects);
            return effects;
        }
        if event.is_delete() {
            self.delete_selected(&mut effects);
            return effects;
        }

        match *event {
            InputEvent::Pointer {
                button: PointerButton::Primary,
                action: ButtonAction::Down,
                position,
            } => self.pointer_down(position, mapping, &mut effects),
            InputEvent::Pointer {
                button: PointerButton::Primary,
                action: ButtonAction::Up,
                position,
            } => self.pointer_up(position, mapping, &mut effects),
            InputEvent::PointerMotion { position } => {
                self.pointer_move(position, mapping, &mut effects)
            }
            _ => {}
        }

        effects
    }

    /// Restores the state from before the last committed edit.
    pub fn undo(&mut self, effects: &mut Events<EditEffect>) {
        let Some(snapshot) = self.history.pop() else {
            return;
        };

        self.sprites.restore(snapshot);
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.notify(effects);
    }

    pub fn delete_selected(&mut self, effects: &mut Events<EditEffect>) {
        let Some(index) = self.selected.filter(|&i| i < self.sprites.len()) else {
            return;
        };

        self.save_history();
        self.sprites.remove(index);
        self.selected = None;
        self.gesture = Gesture::Idle;
        self.notify(effects);
    }

    fn pointer_down(
        &mut self,
        position: Point2<f32>,
        mapping: &dyn CoordinateMapping,
        effects: &mut Events<EditEffect>,
    ) {
        effects.push(EditEffect::Redraw);

        if !mapping.contains_local(position) {
            self.selected = None;
            self.gesture = Gesture::Idle;
            return;
        }

        let point = clamp_to_image(mapping.local_to_image(position), mapping.image_size());

        if let Some((index, handle)) = self.hit_handle(point, mapping) {
            self.selected = Some(index);
            self.save_history();
            self.gesture = Gesture::Resizing {
                index,
                handle,
                start_rect: self.sprites.get(index).map(|r| r.rect).unwrap_or_default(),
            };
        } else {
            self.selected = None;
            self.gesture = Gesture::Dragging {
                start: position,
                current: position,
            };
        }
    }

    fn pointer_move(
        &mut self,
        position: Point2<f32>,
        mapping: &dyn CoordinateMapping,
        effects: &mut Events<EditEffect>,
    ) {
        match self.gesture {
            Gesture::Resizing {
                index,
                handle,
                start_rect,
            } => {
                let point = clamp_to_image(mapping.local_to_image(position), mapping.image_size());
                let resized = apply_resize(&start_rect, point, handle, self.settings.min_size);
                if self.sprites.set_rect(index, resized) {
                    effects.push(EditEffect::Redraw);
                }
            }
            Gesture::Dragging { start, .. } => {
                self.gesture = Gesture::Dragging {
                    start,
                    current: position,
                };
                effects.push(EditEffect::Redraw);
            }
            Gesture::Idle => {
                let cursor = if mapping.contains_local(position) {
                    let point = mapping.local_to_image(position);
                    self.hit_handle(point, mapping)
                        .map(|(_, handle)| handle.cursor())
                        .unwrap_or_default()
                } else {
                    CursorShape::Arrow
                };

                if cursor != self.cursor {
                    self.cursor = cursor;
                    effects.push(EditEffect::Cursor(cursor));
                }
            }
        }
    }

    fn pointer_up(
        &mut self,
        position: Point2<f32>,
        mapping: &dyn CoordinateMapping,
        effects: &mut Events<EditEffect>,
    ) {
        match std::mem::take(&mut self.gesture) {
            Gesture::Resizing { .. } => {
                self.notify(effects);
            }
            Gesture::Dragging { start, .. } => {
                let min_size = self.settings.min_size;
                let rect = drag_to_image_rect(start, position, mapping)
                    .filter(|r| r.width() >= min_size && r.height() >= min_size);

                if let Some(rect) = rect {
                    self.save_history();
                    let id = self.sprites.push(rect);
                    self.selected = self.sprites.index_of(id);
                    log::debug!("added sprite {id} at {rect:?}");
                    self.notify(effects);
                } else {
                    effects.push(EditEffect::Redraw);
                }
            }
            Gesture::Idle => {}
        }
    }

    /// Handle zone half-size in image pixels: a fixed number of screen
    /// pixels, whatever the zoom and stretch.
    fn handle_tolerance(&self, mapping: &dyn CoordinateMapping) -> Vector2<f32> {
        let zoom = mapping.zoom();
        let screen = if zoom > 0. {
            (self.settings.handle_pixels / zoom).max(MIN_HANDLE_PIXELS)
        } else {
            self.settings.handle_pixels
        };

        let scale = mapping.draw_scale();
        vector![
            if scale.x > 0. { screen / scale.x } else { screen },
            if scale.y > 0. { screen / scale.y } else { screen }
        ]
    }

    /// Top-most rectangle with a handle under `point`.
    fn hit_handle(
        &self,
        point: Point2<f32>,
        mapping: &dyn CoordinateMapping,
    ) -> Option<(usize, Handle)> {
        let tolerance = self.handle_tolerance(mapping);
        self.sprites
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, record)| hit_handle(&record.rect, point, tolerance).map(|h| (i, h)))
    }

    fn save_history(&mut self) {
        self.history.push(self.sprites.snapshot());
    }

    fn notify(&self, effects: &mut Events<EditEffect>) {
        effects.push(EditEffect::Changed(self.sprites.rects()));
        effects.push(EditEffect::Redraw);
    }
}

fn clamp_to_image(point: Point2<f32>, image: Vector2<f32>) -> Point2<f32> {
    Point2::new(point.x.clamp(0., image.x), point.y.clamp(0., image.y))
}

/// Converts a local-space drag into an image-space rectangle, clipped to the
/// drawn image. `None` when nothing of the drag lands on the image.
fn drag_to_image_rect(
    start: Point2<f32>,
    current: Point2<f32>,
    mapping: &dyn CoordinateMapping,
) -> Option<Rect> {
    let draw = mapping.draw_rect();
    let clipped = Rect::from_points(start, current).intersection(&draw);
    if clipped.is_empty() {
        return None;
    }

    let scale = mapping.draw_scale();
    let rect = Rect::new(
        Point2::from((clipped.position - draw.position).component_div(&scale)),
        clipped.size.component_div(&scale),
    )
    .clamped_to(mapping.image_size());

    (!rect.is_empty()).then_some(rect)
}

#[cfg(test)]
mod tests {
    use nalgebra::point;
    use slicer_collections::SpriteId;
    use slicer_input::{Key, Modifiers};

    use super::*;
    use crate::{StretchMode, Viewport};

    fn viewport() -> Viewport {
        Viewport::identity(vector![100., 100.])
    }

    fn session_with(rects: &[Rect], min_size: f32) -> EditSession {
        let mut session = EditSession::new(EditSettings {
            min_size,
            ..Default::default()
        });
        session.set_sprites(
            rects
                .iter()
                .enumerate()
                .map(|(i, r)| SpriteRecord::new(SpriteId(i as u32), *r)),
        );
        session
    }

    fn drag(
        session: &mut EditSession,
        mapping: &dyn CoordinateMapping,
        from: Point2<f32>,
        to: Point2<f32>,
    ) -> Vec<EditEffect> {
        let mut effects = Vec::new();
        effects.extend(session.update(&InputEvent::pointer_down(from), Some(mapping)));
        effects.extend(session.update(&InputEvent::pointer_move(to), Some(mapping)));
        effects.extend(session.update(&InputEvent::pointer_up(to), Some(mapping)));
        effects
    }

    fn changes(effects: &[EditEffect]) -> Vec<Vec<Rect>> {
        effects
            .iter()
            .filter_map(|e| match e {
                EditEffect::Changed(rects) => Some(rects.clone()),
                _ => None,
            })
            .collect()
    }

    fn undo_key() -> InputEvent {
        InputEvent::key_down(Key::Z, Modifiers::CTRL)
    }

    #[test]
    fn test_drag_creates_rect() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(60., 60., 10., 10.)], 1.);

        let effects = drag(&mut session, &vp, point![5., 5.], point![25., 25.]);

        let expected = vec![
            Rect::from_xywh(60., 60., 10., 10.),
            Rect::from_xywh(5., 5., 20., 20.),
        ];
        assert_eq!(changes(&effects), vec![expected]);
        assert_eq!(session.selected(), Some(1));
        assert_eq!(session.selected_record().unwrap().id, SpriteId(1));
        assert_eq!(session.gesture(), Gesture::Idle);
    }

    #[test]
    fn test_drag_backwards_normalizes() {
        let vp = viewport();
        let mut session = EditSession::default();
        drag(&mut session, &vp, point![30., 40.], point![10., 15.]);
        assert_eq!(
            session.sprites().rects(),
            vec![Rect::from_xywh(10., 15., 20., 25.)]
        );
    }

    #[test]
    fn test_drag_preview_while_dragging() {
        let vp = viewport();
        let mut session = EditSession::default();
        session.update(&InputEvent::pointer_down(point![10., 10.]), Some(&vp));
        session.update(&InputEvent::pointer_move(point![150., 30.]), Some(&vp));

        assert_eq!(
            session.drag_preview(&vp),
            Some(Rect::from_xywh(10., 10., 90., 20.))
        );
        assert!(session.sprites().is_empty());
    }

    #[test]
    fn test_small_drag_is_discarded() {
        let vp = viewport();
        let mut session = session_with(&[], 5.);
        let effects = drag(&mut session, &vp, point![10., 10.], point![13., 30.]);

        assert!(changes(&effects).is_empty());
        assert!(session.sprites().is_empty());
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_drag_is_clipped_to_canvas() {
        let vp = Viewport::new(
            vector![200., 100.],
            vector![50., 50.],
            StretchMode::KeepAspectCentered,
            1.,
        );
        let mut session = EditSession::default();
        // Canvas spans x 50..150 in local space at 2 local units per pixel.
        drag(&mut session, &vp, point![60., 20.], point![190., 60.]);

        assert_eq!(
            session.sprites().rects(),
            vec![Rect::from_xywh(5., 10., 45., 20.)]
        );
    }

    #[test]
    fn test_pointer_down_outside_canvas_clears_selection() {
        let vp = Viewport::new(
            vector![200., 100.],
            vector![50., 50.],
            StretchMode::KeepAspectCentered,
            1.,
        );
        let mut session = session_with(&[Rect::from_xywh(5., 5., 10., 10.)], 1.);
        // Local (60, 10) is the top-left corner, image pixel (5, 5).
        session.update(&InputEvent::pointer_down(point![60., 10.]), Some(&vp));
        session.update(&InputEvent::pointer_up(point![60., 10.]), Some(&vp));
        assert_eq!(session.selected(), Some(0));

        session.update(&InputEvent::pointer_down(point![10., 10.]), Some(&vp));
        assert_eq!(session.selected(), None);
        assert_eq!(session.gesture(), Gesture::Idle);
    }

    #[test]
    fn test_resize_top_left_clamps_at_min_size() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 50., 50.)], 5.);

        let effects = drag(&mut session, &vp, point![10., 10.], point![60., 60.]);

        assert_eq!(
            changes(&effects),
            vec![vec![Rect::from_xywh(55., 55., 5., 5.)]]
        );
        assert_eq!(session.selected(), Some(0));
        assert_eq!(session.history_len(), 1);
    }

    #[test]
    fn test_resize_is_anchored_to_gesture_start() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 50., 50.)], 1.);

        session.update(&InputEvent::pointer_down(point![60., 35.]), Some(&vp));
        assert!(matches!(
            session.gesture(),
            Gesture::Resizing {
                handle: Handle::Right,
                ..
            }
        ));

        for x in [70., 20., 90., 40.] {
            session.update(&InputEvent::pointer_move(point![x, 80.]), Some(&vp));
        }
        session.update(&InputEvent::pointer_up(point![40., 80.]), Some(&vp));

        assert_eq!(
            session.sprites().rects(),
            vec![Rect::from_xywh(10., 10., 30., 50.)]
        );
    }

    #[test]
    fn test_resize_clamps_to_image_bounds() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 50., 50.)], 1.);
        session.update(&InputEvent::pointer_down(point![60., 60.]), Some(&vp));
        session.update(&InputEvent::pointer_move(point![500., 500.]), Some(&vp));

        assert_eq!(
            session.sprites().rects(),
            vec![Rect::from_xywh(10., 10., 90., 90.)]
        );
    }

    #[test]
    fn test_handle_tolerance_follows_zoom() {
        let rect = Rect::from_xywh(10., 10., 50., 50.);

        // 4 screen pixels at zoom 1 reach 3 pixels away from the edge.
        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![7., 35.]), Some(&viewport()));
        assert!(matches!(session.gesture(), Gesture::Resizing { .. }));

        // Zoomed in 4x, the zone shrinks to the 2 pixel minimum.
        let zoomed = viewport().with_zoom(4.);
        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![7., 35.]), Some(&zoomed));
        assert!(matches!(session.gesture(), Gesture::Dragging { .. }));
    }

    #[test]
    fn test_handle_tolerance_follows_draw_scale() {
        let rect = Rect::from_xywh(10., 10., 20., 20.);

        // Two local units per image pixel: 4 screen pixels reach 2 image pixels.
        let letterbox = Viewport::new(
            vector![200., 100.],
            vector![50., 50.],
            StretchMode::KeepAspectCentered,
            1.,
        );
        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![67., 40.]), Some(&letterbox));
        assert!(matches!(
            session.gesture(),
            Gesture::Resizing {
                handle: Handle::Left,
                ..
            }
        ));

        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![65., 40.]), Some(&letterbox));
        assert!(matches!(session.gesture(), Gesture::Dragging { .. }));

        // Stretched 4x2: the zone is 1 image pixel wide and 2 tall.
        let stretched = Viewport::new(vector![200., 100.], vector![50., 50.], StretchMode::Scale, 1.);
        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![34., 40.]), Some(&stretched));
        assert!(matches!(session.gesture(), Gesture::Dragging { .. }));

        let mut session = session_with(&[rect], 1.);
        session.update(&InputEvent::pointer_down(point![80., 17.]), Some(&stretched));
        assert!(matches!(
            session.gesture(),
            Gesture::Resizing {
                handle: Handle::Top,
                ..
            }
        ));
    }

    #[test]
    fn test_disabling_mid_resize_commits_change() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 50., 50.)], 1.);
        session.update(&InputEvent::pointer_down(point![60., 60.]), Some(&vp));
        session.update(&InputEvent::pointer_move(point![70., 70.]), Some(&vp));

        let effects = session.set_enabled(false);

        assert_eq!(
            changes(&effects.into_vec()),
            vec![vec![Rect::from_xywh(10., 10., 60., 60.)]]
        );
        assert_eq!(session.gesture(), Gesture::Idle);
        assert!(session.set_enabled(true).is_empty());
    }

    #[test]
    fn test_drag_inside_existing_rect_draws_new_one() {
        let vp = viewport();
        let outer = Rect::from_xywh(10., 10., 50., 50.);
        let mut session = session_with(&[outer], 1.);
        session.update(&InputEvent::pointer_down(point![30., 30.]), Some(&vp));
        assert_eq!(session.selected(), None);
        assert!(matches!(session.gesture(), Gesture::Dragging { .. }));

        let effects = session.update(&InputEvent::pointer_up(point![45., 45.]), Some(&vp));

        assert_eq!(
            changes(&effects.into_vec()),
            vec![vec![outer, Rect::from_xywh(30., 30., 15., 15.)]]
        );
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_add_then_undo_restores_exactly() {
        let vp = viewport();
        let mut session = session_with(
            &[
                Rect::from_xywh(60., 60., 10., 10.),
                Rect::from_xywh(80., 0., 5., 5.),
            ],
            1.,
        );
        let before = session.sprites().records();

        drag(&mut session, &vp, point![5., 5.], point![25., 25.]);
        assert_eq!(session.sprites().len(), 3);

        let effects = session.update(&undo_key(), Some(&vp));
        assert_eq!(session.sprites().records(), before);
        assert_eq!(changes(&effects.into_vec()).len(), 1);
        assert_eq!(session.selected(), None);

        // History is exhausted now.
        let effects = session.update(&undo_key(), Some(&vp));
        assert!(effects.is_empty());
        assert_eq!(session.sprites().records(), before);
    }

    #[test]
    fn test_undo_resize_and_delete() {
        let vp = viewport();
        let original = Rect::from_xywh(10., 10., 50., 50.);
        let mut session = session_with(&[original], 1.);

        drag(&mut session, &vp, point![60., 60.], point![80., 80.]);
        session.update(&InputEvent::key_down(Key::Delete, Modifiers::NONE), Some(&vp));
        assert!(session.sprites().is_empty());

        session.update(&undo_key(), Some(&vp));
        assert_eq!(
            session.sprites().rects(),
            vec![Rect::from_xywh(10., 10., 70., 70.)]
        );

        session.update(&undo_key(), Some(&vp));
        assert_eq!(session.sprites().rects(), vec![original]);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_delete_without_selection_is_noop() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 5., 5.)], 1.);
        let backspace = InputEvent::key_down(Key::Backspace, Modifiers::NONE);
        let effects = session.update(&backspace, Some(&vp));

        assert!(effects.is_empty());
        assert_eq!(session.sprites().len(), 1);
        assert_eq!(session.history_len(), 0);
    }

    #[test]
    fn test_ids_keep_increasing_after_delete() {
        let vp = viewport();
        let mut session = EditSession::default();
        drag(&mut session, &vp, point![0., 0.], point![10., 10.]);
        drag(&mut session, &vp, point![20., 20.], point![30., 30.]);
        session.update(&InputEvent::key_down(Key::Delete, Modifiers::NONE), Some(&vp));
        drag(&mut session, &vp, point![40., 40.], point![50., 50.]);

        let ids: Vec<_> = session.sprites().iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_undo_recomputes_next_id_from_restored_set() {
        let vp = viewport();
        let mut session = EditSession::default();
        drag(&mut session, &vp, point![0., 0.], point![10., 10.]);
        drag(&mut session, &vp, point![20., 20.], point![30., 30.]);
        session.update(&undo_key(), Some(&vp));

        assert_eq!(session.sprites().next_id(), SpriteId(1));
    }

    #[test]
    fn test_input_ignored_when_disabled_or_without_image() {
        let vp = viewport();
        let mut session = EditSession::default();
        session.set_enabled(false);
        assert!(drag(&mut session, &vp, point![0., 0.], point![10., 10.]).is_empty());

        session.set_enabled(true);
        let effects = session.update(&InputEvent::pointer_down(point![0., 0.]), None);
        assert!(effects.is_empty());

        let empty = Viewport::identity(vector![0., 0.]);
        assert!(drag(&mut session, &empty, point![0., 0.], point![10., 10.]).is_empty());
        assert!(session.sprites().is_empty());
    }

    #[test]
    fn test_hover_reports_cursor_changes() {
        let vp = viewport();
        let mut session = session_with(&[Rect::from_xywh(10., 10., 50., 50.)], 1.);

        let effects = session.update(&InputEvent::pointer_move(point![60., 35.]), Some(&vp));
        assert_eq!(effects.into_vec(), vec![EditEffect::Cursor(CursorShape::Horizontal)]);

        let effects = session.update(&InputEvent::pointer_move(point![61., 36.]), Some(&vp));
        assert!(effects.is_empty());

        let effects = session.update(&InputEvent::pointer_move(point![35., 35.]), Some(&vp));
        assert_eq!(effects.into_vec(), vec![EditEffect::Cursor(CursorShape::Arrow)]);
    }

    #[test]
    fn test_set_sprites_clears_history_and_selection() {
        let vp = viewport();
        let mut session = EditSession::default();
        drag(&mut session, &vp, point![0., 0.], point![10., 10.]);
        assert_eq!(session.history_len(), 1);

        session.set_sprites([SpriteRecord::new(SpriteId(9), Rect::from_xywh(1., 1., 2., 2.))]);
        assert_eq!(session.history_len(), 0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.sprites().next_id(), SpriteId(10));
    }

    #[test]
    fn test_change_sink_receives_commits() {
        let vp = viewport();
        let mut session = EditSession::default();
        let mut received = Vec::new();

        let effects = session.update(&InputEvent::pointer_down(point![5., 5.]), Some(&vp));
        notify_changes(&effects, &mut |rects: &[Rect]| received.push(rects.to_vec()));
        let effects = session.update(&InputEvent::pointer_up(point![25., 25.]), Some(&vp));
        notify_changes(&effects, &mut |rects: &[Rect]| received.push(rects.to_vec()));

        assert_eq!(received, vec![vec![Rect::from_xywh(5., 5., 20., 20.)]]);
    }
}

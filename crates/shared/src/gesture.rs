//! Pointer gesture interpretation.
//!
//! Raw pointer events (mouse, touch and pen all look alike here) go in,
//! high-level [`Intent`]s come out. The interpreter is a small state machine:
//!
//! ```text
//! Idle --down--> Dragging --second down--> Pinching
//!  ^                |                         |
//!  +------up--------+      one finger up -----+--> Dragging (from current point)
//! ```
//!
//! It never mutates the viewport itself. Callers pass the current
//! [`Viewport`] so grid cells and drag origins can be resolved, then apply the
//! returned intents with [`Viewport::apply`] or route them to marker actions.
use std::collections::HashMap;

use crate::grid::GridCell;
use crate::models::MarkerId;
use crate::viewport::Viewport;

pub type PointerId = i32;

/// Wheel zoom factors per tick.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const WHEEL_ZOOM_IN: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// What was under the pointer when it went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Grid,
    Marker(MarkerId),
}

/// One pointer sample. `x`/`y` are container-relative screen pixels and
/// `time_ms` is any monotonic clock in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub x: f64,
    pub y: f64,
    pub phase: PointerPhase,
    pub time_ms: f64,
    pub target: HitTarget,
    pub ctrl: bool,
}

impl PointerEvent {
    pub fn new(id: PointerId, x: f64, y: f64, phase: PointerPhase, time_ms: f64) -> Self {
        PointerEvent {
            id,
            x,
            y,
            phase,
            time_ms,
            target: HitTarget::Grid,
            ctrl: false,
        }
    }

    pub fn on(mut self, target: HitTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = ctrl;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Drag pan: the offset becomes `origin + (dx, dy)`, where `origin` is
    /// the offset captured when the drag started.
    PanBy {
        origin: (f64, f64),
        dx: f64,
        dy: f64,
    },
    /// Multiply the scale by `factor`, anchored at screen point `(x, y)`.
    ZoomAt { x: f64, y: f64, factor: f64 },
    TapAt(GridCell),
    DoubleTapAt(GridCell),
    TapMarker(MarkerId),
    LongPressMarker(MarkerId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Per-axis movement (px) after which a press becomes a drag.
    pub drag_threshold: f64,
    /// Max gap between two pointer-downs for a double tap.
    pub double_tap_ms: f64,
    /// Hold time on a marker after which release means long-press.
    pub long_press_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            drag_threshold: 3.0,
            double_tap_ms: 300.0,
            long_press_ms: 500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Dragging,
    Pinching,
}

#[derive(Debug, Clone)]
struct Drag {
    pointer: PointerId,
    start: (f64, f64),
    origin_offset: (f64, f64),
    moved: bool,
    down_ms: f64,
    target: HitTarget,
    ctrl: bool,
    // The press already produced a double-tap, so its release is not a tap
    consumed: bool,
}

#[derive(Debug, Clone)]
struct Pinch {
    a: PointerId,
    b: PointerId,
    distance: f64,
}

#[derive(Debug, Clone)]
enum Mode {
    Idle,
    Dragging(Drag),
    Pinching(Pinch),
}

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    config: GestureConfig,
    mode: Mode,
    pointers: HashMap<PointerId, (f64, f64)>,
    last_grid_down_ms: Option<f64>,
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

impl GestureInterpreter {
    pub fn new(config: GestureConfig) -> Self {
        GestureInterpreter {
            config,
            mode: Mode::Idle,
            pointers: HashMap::new(),
            last_grid_down_ms: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn mode(&self) -> GestureMode {
        match self.mode {
            Mode::Idle => GestureMode::Idle,
            Mode::Dragging(_) => GestureMode::Dragging,
            Mode::Pinching(_) => GestureMode::Pinching,
        }
    }

    /// True once the current press has moved past the drag threshold.
    pub fn is_panning(&self) -> bool {
        matches!(&self.mode, Mode::Dragging(d) if d.moved)
    }

    pub fn active_pointers(&self) -> usize {
        self.pointers.len()
    }

    /// Drop all pointers and return to `Idle`. The double-tap clock is kept.
    pub fn reset(&mut self) {
        self.pointers.clear();
        self.mode = Mode::Idle;
    }

    pub fn handle(&mut self, event: &PointerEvent, viewport: &Viewport) -> Vec<Intent> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event, viewport),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(event, viewport),
            PointerPhase::Cancel => {
                self.reset();
                Vec::new()
            }
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent, viewport: &Viewport) -> Vec<Intent> {
        let mut intents = Vec::new();
        self.pointers.insert(event.id, (event.x, event.y));

        match &self.mode {
            Mode::Idle => {
                let mut consumed = false;
                if event.target == HitTarget::Grid {
                    let in_window = self.last_grid_down_ms.is_some_and(|prev| {
                        let gap = event.time_ms - prev;
                        gap > 0.0 && gap < self.config.double_tap_ms
                    });
                    if in_window {
                        let cell = viewport.transform().screen_to_grid(event.x, event.y);
                        if cell.is_placeable() {
                            intents.push(Intent::DoubleTapAt(cell));
                        }
                        consumed = true;
                        self.last_grid_down_ms = None;
                    } else {
                        self.last_grid_down_ms = Some(event.time_ms);
                    }
                } else {
                    self.last_grid_down_ms = None;
                }

                self.mode = Mode::Dragging(Drag {
                    pointer: event.id,
                    start: (event.x, event.y),
                    origin_offset: viewport.offset(),
                    moved: false,
                    down_ms: event.time_ms,
                    target: event.target,
                    ctrl: event.ctrl,
                    consumed,
                });
            }
            Mode::Dragging(drag) if drag.pointer != event.id => {
                let first = drag.pointer;
                if let Some(&a) = self.pointers.get(&first) {
                    // A pinch never counts toward a double tap
                    self.last_grid_down_ms = None;
                    self.mode = Mode::Pinching(Pinch {
                        a: first,
                        b: event.id,
                        distance: distance(a, (event.x, event.y)),
                    });
                }
            }
            // Repeated down for the active pointer, or a third finger during a pinch
            Mode::Dragging(_) | Mode::Pinching(_) => {}
        }

        intents
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> Vec<Intent> {
        let mut intents = Vec::new();
        let Some(pos) = self.pointers.get_mut(&event.id) else {
            // Hover without a press
            return intents;
        };
        *pos = (event.x, event.y);

        match &mut self.mode {
            Mode::Dragging(drag) if drag.pointer == event.id => {
                let dx = event.x - drag.start.0;
                let dy = event.y - drag.start.1;
                let threshold = self.config.drag_threshold;
                if !drag.moved && (dx.abs() > threshold || dy.abs() > threshold) {
                    drag.moved = true;
                }
                if drag.moved {
                    intents.push(Intent::PanBy {
                        origin: drag.origin_offset,
                        dx,
                        dy,
                    });
                }
            }
            Mode::Pinching(pinch) if event.id == pinch.a || event.id == pinch.b => {
                let (Some(&pa), Some(&pb)) =
                    (self.pointers.get(&pinch.a), self.pointers.get(&pinch.b))
                else {
                    return intents;
                };
                let new_distance = distance(pa, pb);
                if pinch.distance > 0.0 && new_distance > 0.0 {
                    let (mx, my) = midpoint(pa, pb);
                    intents.push(Intent::ZoomAt {
                        x: mx,
                        y: my,
                        factor: new_distance / pinch.distance,
                    });
                }
                pinch.distance = new_distance;
            }
            _ => {}
        }

        intents
    }

    fn pointer_up(&mut self, event: &PointerEvent, viewport: &Viewport) -> Vec<Intent> {
        let mut intents = Vec::new();
        if self.pointers.remove(&event.id).is_none() {
            return intents;
        }

        match std::mem::replace(&mut self.mode, Mode::Idle) {
            Mode::Dragging(drag) if drag.pointer == event.id => {
                if !drag.moved && !drag.consumed {
                    intents.push(self.release_intent(&drag, event, viewport));
                }
            }
            Mode::Pinching(pinch) if event.id == pinch.a || event.id == pinch.b => {
                let partner = if event.id == pinch.a { pinch.b } else { pinch.a };
                self.mode = self.after_pinch_finger_lifted(partner, viewport);
            }
            other => self.mode = other,
        }

        if self.pointers.is_empty() {
            self.mode = Mode::Idle;
        }
        intents
    }

    fn release_intent(&self, drag: &Drag, event: &PointerEvent, viewport: &Viewport) -> Intent {
        match drag.target {
            HitTarget::Grid => Intent::TapAt(viewport.transform().screen_to_grid(event.x, event.y)),
            HitTarget::Marker(id) => {
                let held = event.time_ms - drag.down_ms;
                if drag.ctrl || event.ctrl || held > self.config.long_press_ms {
                    Intent::LongPressMarker(id)
                } else {
                    Intent::TapMarker(id)
                }
            }
        }
    }

    /// Pick the next mode when one pinch finger lifts. With one contact left
    /// the gesture continues as a drag from where that finger is now, so the
    /// map does not jump. A lingering third contact re-forms the pinch.
    fn after_pinch_finger_lifted(&self, partner: PointerId, viewport: &Viewport) -> Mode {
        let Some(&partner_pos) = self.pointers.get(&partner) else {
            return Mode::Idle;
        };

        let mut others: Vec<PointerId> = self
            .pointers
            .keys()
            .copied()
            .filter(|id| *id != partner)
            .collect();
        others.sort_unstable();

        if let Some(&third) = others.first() {
            let third_pos = self.pointers[&third];
            return Mode::Pinching(Pinch {
                a: partner,
                b: third,
                distance: distance(partner_pos, third_pos),
            });
        }

        Mode::Dragging(Drag {
            pointer: partner,
            start: partner_pos,
            origin_offset: viewport.offset(),
            // Never a tap: the press started as part of a pinch
            moved: true,
            down_ms: 0.0,
            target: HitTarget::Grid,
            ctrl: false,
            consumed: true,
        })
    }
}

/// Wheel zoom: one tick in or out, anchored at the container center.
pub fn wheel_intent(delta_y: f64, viewport: &Viewport) -> Option<Intent> {
    if delta_y == 0.0 || !delta_y.is_finite() {
        return None;
    }
    let factor = if delta_y > 0.0 {
        WHEEL_ZOOM_OUT
    } else {
        WHEEL_ZOOM_IN
    };
    let (x, y) = viewport.center();
    Some(Intent::ZoomAt { x, y, factor })
}

use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use scroll_stabilizer::{Edge, InputVerdict, NavKey, Stabilizer, StabilizerSnapshot};

use crate::{DomHost, Document};

type Inner<D> = Stabilizer<DomHost<D>>;

/// A shared handle to one attached stabilizer.
///
/// Clones refer to the same stabilizer. Event listeners installed by a UI layer hold clones and
/// forward into it.
///
/// Each call takes the stabilizer exclusively for its duration. A call that arrives while another
/// one is still running (for example a scroll listener fired synchronously by a programmatic
/// `scrollTop` write) is dropped.
pub struct Controller<D: Document> {
    inner: Rc<RefCell<Inner<D>>>,
}

impl<D: Document> Clone for Controller<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<D: Document> fmt::Debug for Controller<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f.debug_tuple("Controller").field(&*inner).finish(),
            Err(_) => f.write_str("Controller(<busy>)"),
        }
    }
}

impl<D: Document> Controller<D> {
    pub fn new(stabilizer: Stabilizer<DomHost<D>>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(stabilizer)),
        }
    }

    /// Whether both handles refer to the same stabilizer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn read<R>(&self, f: impl FnOnce(&Inner<D>) -> R) -> Option<R> {
        match self.inner.try_borrow() {
            Ok(inner) => Some(f(&inner)),
            Err(_) => {
                atrace!("controller busy; read skipped");
                None
            }
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut Inner<D>) -> R) -> Option<R> {
        match self.inner.try_borrow_mut() {
            Ok(mut inner) => Some(f(&mut inner)),
            Err(_) => {
                atrace!("controller busy; re-entrant event dropped");
                None
            }
        }
    }

    pub fn edge(&self) -> Option<Edge> {
        self.read(|s| s.edge())
    }

    pub fn container(&self) -> Option<D::Node> {
        self.read(|s| s.host().container().clone())
    }

    pub fn spacer(&self) -> Option<D::Node> {
        self.read(|s| s.host().spacer().cloned()).flatten()
    }

    pub fn snapshot(&self) -> Option<StabilizerSnapshot> {
        self.read(|s| s.snapshot())
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.read(|s| s.next_deadline()).flatten()
    }

    /// Whether subtree mutations should currently be forwarded to [`Controller::on_mutation`].
    pub fn observes_mutations(&self) -> bool {
        self.read(|s| s.observes_mutations()).unwrap_or(false)
    }

    pub fn on_pointer_down(&self, target: &D::Node, now_ms: u64) {
        self.write(|s| s.on_pointer_down(target, now_ms));
    }

    /// Handles a click and then runs the settle step the click queued.
    ///
    /// UI layers that dispatch their own microtasks can call [`Controller::on_click_deferred`]
    /// and [`Controller::run_microtasks`] separately instead.
    pub fn on_click(&self, target: &D::Node, now_ms: u64) {
        self.on_click_deferred(target, now_ms);
        self.run_microtasks(now_ms);
    }

    pub fn on_click_deferred(&self, target: &D::Node, now_ms: u64) {
        self.write(|s| s.on_click(target, now_ms));
    }

    pub fn run_microtasks(&self, now_ms: u64) {
        self.write(|s| s.run_microtasks(now_ms));
    }

    pub fn on_mutation(&self) {
        self.write(|s| s.on_mutation());
    }

    pub fn on_scroll(&self, now_ms: u64) {
        self.write(|s| s.on_scroll(now_ms));
    }

    pub fn on_wheel(&self, delta: i64, now_ms: u64) -> InputVerdict {
        self.write(|s| s.on_wheel(delta, now_ms))
            .unwrap_or(InputVerdict::Allow)
    }

    pub fn on_touch_start(&self, y: i64, now_ms: u64) {
        self.write(|s| s.on_touch_start(y, now_ms));
    }

    pub fn on_touch_move(&self, y: i64, now_ms: u64) -> InputVerdict {
        self.write(|s| s.on_touch_move(y, now_ms))
            .unwrap_or(InputVerdict::Allow)
    }

    /// Handles a `keydown` by its `key` value. Keys that do not scroll are always allowed.
    pub fn on_key_down(&self, key: &str, now_ms: u64) -> InputVerdict {
        let Some(key) = NavKey::from_key(key) else {
            return InputVerdict::Allow;
        };
        self.write(|s| s.on_key_down(key, now_ms))
            .unwrap_or(InputVerdict::Allow)
    }

    pub fn tick(&self, now_ms: u64) {
        self.write(|s| s.tick(now_ms));
    }

    /// Returns the stabilizer to its baseline state immediately.
    pub fn force_off(&self) {
        if self.write(|s| s.force_off()).is_none() {
            awarn!("force_off skipped: controller busy");
        }
    }
}

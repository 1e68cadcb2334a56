#![forbid(unsafe_code)]

//! Toast records and the values used to create and patch them.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Ids wrap modulo this bound (the largest integer a JavaScript number
/// represents exactly), so ids stay within the range the page glue
/// round-trips through the DOM.
pub const ID_MODULUS: u64 = (1 << 53) - 1;

/// Unique identifier of a toast within one [`Toaster`](crate::Toaster).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    /// Wrap an existing id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Monotonic id source. The counter is advanced before use, so the first id
/// is `"1"`.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    count: u64,
}

impl IdGenerator {
    /// Generator whose next id is `start + 1` (mod [`ID_MODULUS`]).
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self {
            count: start % ID_MODULUS,
        }
    }

    /// Produce the next id.
    pub fn next_id(&mut self) -> ToastId {
        self.count = (self.count + 1) % ID_MODULUS;
        ToastId(self.count.to_string())
    }
}

/// Visual treatment requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastVariant {
    /// Neutral notification.
    #[default]
    Default,
    /// Error or destructive outcome.
    Destructive,
}

/// Caller-defined action attached to a toast (for example an "Undo" button).
///
/// The queue never looks inside; the rendering layer downcasts it back to
/// whatever type the caller stored. Two descriptors are equal when they share
/// the same allocation.
#[derive(Clone)]
pub struct ActionDescriptor(Rc<dyn Any>);

impl ActionDescriptor {
    /// Wrap any value.
    #[must_use]
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the stored value as `T`, if that is its type.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for ActionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor").finish_non_exhaustive()
    }
}

pub(crate) type OpenChange = Rc<dyn Fn(bool)>;

/// What a caller supplies to create a toast.
#[derive(Clone, Default)]
pub struct ToastProps {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) action: Option<ActionDescriptor>,
    pub(crate) variant: ToastVariant,
    pub(crate) on_close: Option<Rc<dyn Fn()>>,
}

impl ToastProps {
    /// Empty props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an action descriptor.
    #[must_use]
    pub fn action(mut self, action: ActionDescriptor) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the variant.
    #[must_use]
    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Called after the toast is dismissed through [`Toast::set_open`].
    #[must_use]
    pub fn on_close(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for ToastProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastProps")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("action", &self.action)
            .field("variant", &self.variant)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Partial update merged into an existing toast. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub action: Option<ActionDescriptor>,
    pub variant: Option<ToastVariant>,
    pub open: Option<bool>,
}

impl ToastPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replace the body text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the action descriptor.
    #[must_use]
    pub fn action(mut self, action: ActionDescriptor) -> Self {
        self.action = Some(action);
        self
    }

    /// Replace the variant.
    #[must_use]
    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Set the open flag directly.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(&self, toast: &mut Toast) {
        if let Some(title) = &self.title {
            toast.title = Some(title.clone());
        }
        if let Some(description) = &self.description {
            toast.description = Some(description.clone());
        }
        if let Some(action) = &self.action {
            toast.action = Some(action.clone());
        }
        if let Some(variant) = self.variant {
            toast.variant = variant;
        }
        if let Some(open) = self.open {
            toast.open = open;
        }
    }
}

/// One notification in the queue.
///
/// Snapshots handed to subscribers are clones; changing a clone never
/// affects the queue.
#[derive(Clone)]
pub struct Toast {
    pub(crate) id: ToastId,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) action: Option<ActionDescriptor>,
    pub(crate) variant: ToastVariant,
    pub(crate) open: bool,
    pub(crate) on_open_change: Option<OpenChange>,
}

impl Toast {
    /// An open toast built from `props`, without a close callback.
    #[must_use]
    pub fn from_props(id: ToastId, props: ToastProps) -> Self {
        Self {
            id,
            title: props.title,
            description: props.description,
            action: props.action,
            variant: props.variant,
            open: true,
            on_open_change: None,
        }
    }

    /// The toast's id.
    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Body text, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Action descriptor, if any.
    #[must_use]
    pub fn action(&self) -> Option<&ActionDescriptor> {
        self.action.as_ref()
    }

    /// Variant.
    #[must_use]
    pub fn variant(&self) -> ToastVariant {
        self.variant
    }

    /// `false` once dismissed; the toast stays listed as "closing" until
    /// removed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Report an open-state change from the rendering layer (for example
    /// the close button). Closing dismisses the toast in its queue.
    pub fn set_open(&self, open: bool) {
        if let Some(callback) = &self.on_open_change {
            callback(open);
        }
    }

    pub(crate) fn with_open_change(mut self, callback: OpenChange) -> Self {
        self.on_open_change = Some(callback);
        self
    }
}

impl PartialEq for Toast {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.description == other.description
            && self.action == other.action
            && self.variant == other.variant
            && self.open == other.open
    }
}

impl fmt::Debug for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toast")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("action", &self.action)
            .field("variant", &self.variant)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

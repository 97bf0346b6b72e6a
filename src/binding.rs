use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct CellInner<T> {
    value: T,
    version: u64,
}

/// Shared root for externally owned UI state.
///
/// A `StateCell` owns one value on behalf of the application; every
/// [`Binding`] derived from it reads and writes through the cell. Writes bump
/// a version counter, which is the change-notification mechanism presenters
/// poll between UI passes.
///
/// The mutex is serialization for `Send + Sync` plumbing, not a concurrency
/// feature: all reads and writes happen on the UI thread.
pub struct StateCell<T> {
    inner: Arc<Mutex<CellInner<T>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> StateCell<T> {
    /// Create a cell owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CellInner { value, version: 0 })),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.inner.lock().expect("state cell lock poisoned").value.clone()
    }

    /// Replace the current value and bump the version counter.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.lock().expect("state cell lock poisoned");
        inner.value = value;
        inner.version += 1;
    }

    /// Observe the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock().expect("state cell lock poisoned").value)
    }

    /// Mutate the value in place and bump the version counter.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.lock().expect("state cell lock poisoned");
        f(&mut inner.value);
        inner.version += 1;
    }

    /// Number of writes applied so far.
    pub fn version(&self) -> u64 {
        self.inner.lock().expect("state cell lock poisoned").version
    }

    /// Derive a two-way binding rooted at this cell.
    pub fn binding(&self) -> Binding<T> {
        let read = self.clone();
        let write = self.clone();
        let versioned = self.clone();
        Binding::derived(
            move || read.get(),
            move |value| write.set(value),
            move || versioned.version(),
        )
    }
}

/// A two-way reference to externally owned mutable state.
///
/// Bindings are transient views: they are re-derived freely, clone cheaply,
/// and own nothing. `get` clones the current value; `set` writes through to
/// the owner. Derived bindings ([`Binding::map`], [`Binding::case`],
/// [`Binding::is_present`]) compose reads and writes over the same root.
///
/// # Examples
///
/// ```rust
/// use tui_navigation::StateCell;
///
/// let cell = StateCell::new(Some(3u32));
/// let binding = cell.binding();
/// assert_eq!(binding.get(), Some(3));
/// binding.set(None);
/// assert_eq!(cell.get(), None);
/// ```
pub struct Binding<T> {
    get: Arc<dyn Fn() -> T + Send + Sync>,
    set: Arc<dyn Fn(T) + Send + Sync>,
    version: Arc<dyn Fn() -> u64 + Send + Sync>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
            version: Arc::clone(&self.version),
        }
    }
}

impl<T: Send + 'static> Binding<T> {
    /// Create a free-standing binding from a get/set pair.
    ///
    /// The binding maintains its own version counter, bumped on every write.
    /// Prefer [`StateCell::binding`] when the state has a natural shared
    /// root; this constructor is the escape hatch for bridging state owned
    /// elsewhere.
    pub fn new(
        get: impl Fn() -> T + Send + Sync + 'static,
        set: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        let writes = Arc::new(AtomicU64::new(0));
        let reads = Arc::clone(&writes);
        Self {
            get: Arc::new(get),
            set: Arc::new(move |value| {
                set(value);
                writes.fetch_add(1, Ordering::Relaxed);
            }),
            version: Arc::new(move || reads.load(Ordering::Relaxed)),
        }
    }

    /// Compose a binding from closures that delegate versioning to a parent.
    pub(crate) fn derived(
        get: impl Fn() -> T + Send + Sync + 'static,
        set: impl Fn(T) + Send + Sync + 'static,
        version: impl Fn() -> u64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
            version: Arc::new(version),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// Write a new value through to the owner.
    pub fn set(&self, value: T) {
        (self.set)(value)
    }

    /// Version of the underlying state, bumped on every write.
    pub fn version(&self) -> u64 {
        (self.version)()
    }

    /// Derive a binding onto part of this value.
    ///
    /// `read` projects the part out; `write` installs an updated part into
    /// the whole, which is then written back in full.
    pub fn map<U: Send + 'static>(
        &self,
        read: impl Fn(&T) -> U + Send + Sync + 'static,
        write: impl Fn(&mut T, U) + Send + Sync + 'static,
    ) -> Binding<U> {
        let source = self.clone();
        let target = self.clone();
        let versioned = self.clone();
        Binding::derived(
            move || read(&source.get()),
            move |part| {
                let mut whole = target.get();
                write(&mut whole, part);
                target.set(whole);
            },
            move || versioned.version(),
        )
    }
}

impl<T: Clone + Send + 'static> Binding<Option<T>> {
    /// Derive the presence flag: `true` iff a value is present.
    ///
    /// Writing `false` clears the underlying optional. Writing `true` with
    /// no value present is a programmer error and a silent no-op; there is
    /// no value to conjure.
    pub fn is_present(&self) -> Binding<bool> {
        let source = self.clone();
        let target = self.clone();
        let versioned = self.clone();
        Binding::derived(
            move || source.get().is_some(),
            move |flag| {
                if !flag && target.get().is_some() {
                    target.set(None);
                }
            },
            move || versioned.version(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_round_trips_through_cell() {
        let cell = StateCell::new(1u32);
        let binding = cell.binding();
        binding.set(2);
        assert_eq!(cell.get(), 2);
        assert_eq!(binding.get(), 2);
    }

    #[test]
    fn version_bumps_on_every_write() {
        let cell = StateCell::new(0u32);
        let binding = cell.binding();
        let start = binding.version();
        binding.set(1);
        cell.set(2);
        assert_eq!(binding.version(), start + 2);
    }

    #[test]
    fn presence_tracks_optionality() {
        let cell = StateCell::new(Some("x".to_string()));
        let binding = cell.binding();
        let present = binding.is_present();

        assert!(present.get());
        binding.set(None);
        assert!(!present.get());
        binding.set(Some("y".to_string()));
        assert!(present.get());
    }

    #[test]
    fn presence_write_false_clears() {
        let cell = StateCell::new(Some(9u8));
        let present = cell.binding().is_present();
        present.set(false);
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn presence_write_true_is_a_no_op() {
        let cell = StateCell::new(None::<u8>);
        let version = cell.version();
        let present = cell.binding().is_present();
        present.set(true);
        assert_eq!(cell.get(), None);
        // No phantom write either.
        assert_eq!(cell.version(), version);
    }

    #[test]
    fn map_projects_a_field() {
        #[derive(Clone)]
        struct Model {
            count: u32,
        }

        let cell = StateCell::new(Model { count: 0 });
        let count = cell.binding().map(|m| m.count, |m, v| m.count = v);
        count.set(5);
        assert_eq!(cell.get().count, 5);
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn standalone_binding_counts_writes() {
        let store = Arc::new(Mutex::new(0u32));
        let read = Arc::clone(&store);
        let write = Arc::clone(&store);
        let binding = Binding::new(
            move || *read.lock().unwrap(),
            move |v| *write.lock().unwrap() = v,
        );
        assert_eq!(binding.version(), 0);
        binding.set(7);
        assert_eq!(binding.get(), 7);
        assert_eq!(binding.version(), 1);
    }
}

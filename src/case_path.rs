use crate::binding::Binding;

/// Partial invertible mapping between an enum and one of its variants.
///
/// `extract` succeeds only when the value holds the target case; `embed`
/// rebuilds the enum from the case payload. Paths are plain fn-pointer pairs
/// attached to a variant, never reflection; use [`case_path!`] to build one
/// from a variant name.
///
/// # Examples
///
/// ```rust
/// use tui_navigation::{case_path, CasePath};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Status {
///     Loading,
///     Failed(String),
/// }
///
/// let failed: CasePath<Status, String> = case_path!(Status::Failed(_));
/// assert_eq!(failed.extract(&Status::Failed("boom".into())), Some("boom".into()));
/// assert_eq!(failed.extract(&Status::Loading), None);
/// assert_eq!(failed.embed("boom".into()), Status::Failed("boom".into()));
/// ```
pub struct CasePath<Root, Value> {
    extract: fn(&Root) -> Option<Value>,
    embed: fn(Value) -> Root,
}

impl<Root, Value> Clone for CasePath<Root, Value> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, Value> Copy for CasePath<Root, Value> {}

impl<Root, Value> CasePath<Root, Value> {
    /// Build a path from an explicit extract/embed pair.
    pub const fn new(extract: fn(&Root) -> Option<Value>, embed: fn(Value) -> Root) -> Self {
        Self { extract, embed }
    }

    /// Project the case payload out of `root`, if `root` holds this case.
    pub fn extract(&self, root: &Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Rebuild the enum from a case payload.
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }
}

/// Build a [`CasePath`] for an enum variant.
///
/// Two forms: `case_path!(Enum::Variant(_))` for a single-payload variant
/// (the payload type must be `Clone`), and `case_path!(Enum::Variant)` for a
/// unit variant, whose case payload is `()`.
#[macro_export]
macro_rules! case_path {
    ($($variant:ident)::+ (_)) => {
        $crate::CasePath::new(
            |root| match root {
                $($variant)::+(value) => ::core::option::Option::Some(value.clone()),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            },
            $($variant)::+,
        )
    };
    ($($variant:ident)::+) => {
        $crate::CasePath::new(
            |root| match root {
                $($variant)::+ => ::core::option::Option::Some(()),
                #[allow(unreachable_patterns)]
                _ => ::core::option::Option::None,
            },
            |()| $($variant)::+,
        )
    };
}

impl<Root: Clone + Send + 'static> Binding<Option<Root>> {
    /// Project one enum case out of an optional sum-typed binding.
    ///
    /// Reads flatten the outer optional through the path's `extract`, so the
    /// result is present exactly when the underlying value exists *and*
    /// holds the target case. Writing `Some(value)` embeds the case back
    /// into the root; writing `None` clears the root. The enum holding a
    /// different case reads as absent; the adapter never reports that as an
    /// error (see the presenter's end-reason reporting for the distinction
    /// hosts can observe).
    pub fn case<Value: Clone + Send + 'static>(
        &self,
        path: CasePath<Root, Value>,
    ) -> Binding<Option<Value>> {
        let source = self.clone();
        let target = self.clone();
        let versioned = self.clone();
        Binding::derived(
            move || source.get().as_ref().and_then(|root| path.extract(root)),
            move |value| match value {
                Some(value) => target.set(Some(path.embed(value))),
                None => target.set(None),
            },
            move || versioned.version(),
        )
    }
}

impl<Root: Clone + Send + 'static> Binding<Root> {
    /// Project one enum case out of a non-optional sum-typed binding.
    ///
    /// Like [`Binding::case`], but the root has no absent state: writing
    /// `None` is dropped rather than clearing anything. Use this when the
    /// enum itself is the whole of the domain state and "dismissed" is one
    /// of its cases.
    pub fn matching<Value: Clone + Send + 'static>(
        &self,
        path: CasePath<Root, Value>,
    ) -> Binding<Option<Value>> {
        let source = self.clone();
        let target = self.clone();
        let versioned = self.clone();
        Binding::derived(
            move || path.extract(&source.get()),
            move |value| {
                if let Some(value) = value {
                    target.set(path.embed(value));
                }
            },
            move || versioned.version(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::StateCell;

    #[derive(Clone, Debug, PartialEq)]
    enum Status {
        Loading,
        Loaded(u32),
        Failed(String),
    }

    #[test]
    fn extract_embed_round_trip() {
        let failed = case_path!(Status::Failed(_));
        let status = failed.embed("nope".to_string());
        assert_eq!(failed.extract(&status), Some("nope".to_string()));
    }

    #[test]
    fn unit_variant_path() {
        let loading = case_path!(Status::Loading);
        assert_eq!(loading.extract(&Status::Loading), Some(()));
        assert_eq!(loading.extract(&Status::Loaded(1)), None);
        assert_eq!(loading.embed(()), Status::Loading);
    }

    #[test]
    fn case_binding_reads_flatten_both_optionals() {
        let cell = StateCell::new(None::<Status>);
        let failed = cell.binding().case(case_path!(Status::Failed(_)));

        assert_eq!(failed.get(), None);
        cell.set(Some(Status::Loading));
        assert_eq!(failed.get(), None);
        cell.set(Some(Status::Failed("boom".to_string())));
        assert_eq!(failed.get(), Some("boom".to_string()));
    }

    #[test]
    fn case_binding_write_some_embeds() {
        let cell = StateCell::new(Some(Status::Loading));
        let failed = cell.binding().case(case_path!(Status::Failed(_)));

        failed.set(Some("oops".to_string()));
        assert_eq!(cell.get(), Some(Status::Failed("oops".to_string())));
        assert_eq!(failed.get(), Some("oops".to_string()));
    }

    #[test]
    fn case_binding_write_none_clears_root() {
        let cell = StateCell::new(Some(Status::Failed("boom".to_string())));
        let failed = cell.binding().case(case_path!(Status::Failed(_)));

        failed.set(None);
        assert_eq!(cell.get(), None);
    }

    #[test]
    fn matching_drops_absent_writes() {
        let cell = StateCell::new(Status::Failed("boom".to_string()));
        let failed = cell.binding().matching(case_path!(Status::Failed(_)));

        assert_eq!(failed.get(), Some("boom".to_string()));
        failed.set(None);
        // A bare enum has no absent state to write.
        assert_eq!(cell.get(), Status::Failed("boom".to_string()));
        failed.set(Some("again".to_string()));
        assert_eq!(cell.get(), Status::Failed("again".to_string()));
    }
}

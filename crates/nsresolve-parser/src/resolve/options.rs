use bitflags::bitflags;

bitflags! {
    /// Declaration kinds the resolver reports.
    ///
    /// ```
    /// use nsresolve_parser::DeclKinds;
    ///
    /// let types_only = DeclKinds::CLASS | DeclKinds::INTERFACE;
    /// assert!(!types_only.contains(DeclKinds::TRAIT));
    /// assert_eq!(DeclKinds::default(), DeclKinds::all());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclKinds: u8 {
        /// `class Name`
        const CLASS = 1 << 0;
        /// `interface Name`
        const INTERFACE = 1 << 1;
        /// `trait Name`
        const TRAIT = 1 << 2;
        /// `enum Name`
        const ENUM = 1 << 3;
    }
}

impl Default for DeclKinds {
    fn default() -> Self {
        DeclKinds::all()
    }
}

/// Configuration for a [`Resolver`](super::Resolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    kinds: DeclKinds,
    max_source_len: Option<usize>,
    open_tags: bool,
}

impl ResolverOptions {
    /// Report every declaration kind, no size limit, honour open tags.
    pub fn new() -> Self {
        Self {
            kinds: DeclKinds::all(),
            max_source_len: None,
            open_tags: true,
        }
    }

    /// Only report declarations of these kinds.
    pub fn with_kinds(mut self, kinds: DeclKinds) -> Self {
        self.kinds = kinds;
        self
    }

    /// Reject sources longer than `bytes` with
    /// [`ResolveErrorKind::SourceTooLarge`](nsresolve_core::ResolveErrorKind::SourceTooLarge).
    pub fn with_max_source_len(mut self, bytes: usize) -> Self {
        self.max_source_len = Some(bytes);
        self
    }

    /// Whether text outside `<?php` ... `?>` is ignored as inline HTML.
    pub fn with_open_tags(mut self, enabled: bool) -> Self {
        self.open_tags = enabled;
        self
    }

    pub fn kinds(&self) -> DeclKinds {
        self.kinds
    }

    pub fn max_source_len(&self) -> Option<usize> {
        self.max_source_len
    }

    pub fn open_tags(&self) -> bool {
        self.open_tags
    }
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self::new()
    }
}

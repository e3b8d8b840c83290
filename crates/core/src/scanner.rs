//! Class scanner that combines root enumeration, name extraction, resolution
//! and interface matching.
//!
//! The scanner runs the discovery pipeline synchronously:
//! 1. The locator reports every root exposing the namespace
//! 2. The extractor derives candidate names from each root, one root at a time
//! 3. The resolver loads each candidate; failures skip that candidate only
//! 4. Interface-filtered queries keep concrete types that conform

use crate::asset::{ExtractedNames, LookupPath, NameExtractor, ResourceLocator, enumerate_roots};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::matcher::implements_interface;
use classpath_api::{Namespace, TypeDescriptor, TypeResolver};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Discovers types under a namespace through a locator and a resolver.
pub struct ClassScanner<L, R> {
    locator: L,
    resolver: R,
    extractor: NameExtractor,
}

impl<R: TypeResolver> ClassScanner<LookupPath, R> {
    /// Scanner over the lookup path in `config`.
    pub fn from_config(config: &ScanConfig, resolver: R) -> Self {
        Self {
            locator: LookupPath::from_config(config),
            resolver,
            extractor: NameExtractor::from_config(config),
        }
    }
}

impl<L: ResourceLocator, R: TypeResolver> ClassScanner<L, R> {
    pub fn new(locator: L, resolver: R) -> Self {
        Self {
            locator,
            resolver,
            extractor: NameExtractor::default(),
        }
    }

    /// Replace the name extractor
    pub fn with_extractor(mut self, extractor: NameExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn locator(&self) -> &L {
        &self.locator
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Run discovery for `namespace` and report what happened.
    ///
    /// An empty or malformed namespace yields an empty report.
    pub fn scan(&self, namespace: &str) -> Result<ScanReport<R::Type>> {
        let mut report = ScanReport::default();
        let Some(namespace) = Namespace::parse(namespace) else {
            debug!("Ignoring empty or malformed namespace {:?}", namespace);
            return Ok(report);
        };
        let start = Instant::now();

        let mut extracted = ExtractedNames::default();
        for root in enumerate_roots(&self.locator, &namespace)? {
            report.roots += 1;
            extracted.merge(self.extractor.extract_names(root, &namespace)?);
        }
        report.candidates = extracted.names.len();
        report.synthetic = extracted.synthetic;

        for candidate in &extracted.names {
            match self.resolver.resolve(candidate) {
                Ok(ty) if ty.is_private() => {
                    debug!("Excluding private type {}", candidate);
                    report.private += 1;
                }
                Ok(ty) => {
                    report.classes.insert(ty);
                }
                Err(e) => {
                    debug!("Skipping {} ({}): {}", candidate, candidate.entry(), e);
                    report.unresolved += 1;
                }
            }
        }

        report.duration = start.elapsed();
        info!(
            "Scan of {} complete: {} roots, {} candidates, {} classes, {} unresolved in {:?}",
            namespace,
            report.roots,
            report.candidates,
            report.classes.len(),
            report.unresolved,
            report.duration
        );

        Ok(report)
    }

    /// Every discoverable type under `namespace`.
    pub fn get_all_classes(&self, namespace: &str) -> Result<HashSet<R::Type>> {
        Ok(self.scan(namespace)?.classes)
    }

    /// Concrete types under `namespace` that implement `interface`, directly,
    /// through an ancestor class, or through an interface extending it.
    ///
    /// Returns an empty set without scanning when `interface` is not
    /// interface-kind.
    pub fn get_concrete_classes_with_interface(
        &self,
        namespace: &str,
        interface: &R::Type,
    ) -> Result<HashSet<R::Type>> {
        if !interface.is_interface() {
            debug!("{} is not an interface", interface.name());
            return Ok(HashSet::new());
        }

        let classes = self
            .get_all_classes(namespace)?
            .into_iter()
            .filter(|ty| ty.is_concrete() && implements_interface(ty, interface))
            .collect();
        Ok(classes)
    }
}

/// Outcome of a discovery run
#[derive(Debug, Clone)]
pub struct ScanReport<T> {
    /// Types discovered
    pub classes: HashSet<T>,
    /// Roots that exposed the namespace
    pub roots: usize,
    /// Distinct candidate names after exclusion
    pub candidates: usize,
    /// Units excluded as anonymous/synthetic
    pub synthetic: usize,
    /// Candidates the resolver could not load
    pub unresolved: usize,
    /// Resolved types excluded as private
    pub private: usize,
    /// Time taken for the scan
    pub duration: Duration,
}

impl<T> Default for ScanReport<T> {
    fn default() -> Self {
        Self {
            classes: HashSet::new(),
            roots: 0,
            candidates: 0,
            synthetic: 0,
            unresolved: 0,
            private: 0,
            duration: Duration::ZERO,
        }
    }
}

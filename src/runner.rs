use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use tracing::{debug, debug_span, trace};

use crate::normalize::{Normalized, normalize_rule};
use crate::types::{BatchReport, Outcome};
use crate::{CompiledExpr, Record, SegmentError, SegmentResults, Verdict};

/// Default number of compiled expressions kept by [`BatchRunner::with_cache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Evaluate a batch of named rules against one record, failing fast.
///
/// Shorthand for [`BatchRunner::new().run(..)`](BatchRunner::run).
///
/// # Errors
///
/// Returns the [`SegmentError`] of the first rule, in iteration order, that
/// fails to parse or bind. No partial results are returned.
pub fn run<I, K, V>(rules: I, record: &Record, now: i64) -> Result<SegmentResults, SegmentError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    BatchRunner::new().run(rules, record, now)
}

/// Sample the wall clock as epoch seconds, for hosts that evaluate a batch
/// "now". Sample once per batch and pass the value to every rule.
#[must_use]
pub fn now_epoch_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

/// Applies normalize, parse, bind and evaluate to each rule of a batch
/// independently.
///
/// A runner holds no per-batch state and can be shared across threads. With
/// [`with_cache`](Self::with_cache) it memoizes bound expressions by their
/// canonical text. Rules that call `_now()` are always compiled fresh, so a
/// cached expression never carries a stale timestamp.
///
/// # Example
///
/// ```
/// use segmentor::{BatchRunner, Record};
///
/// let record = Record {
///     id: "user-123".into(),
///     level: 12,
///     country: "Turkey".into(),
///     ..Record::default()
/// };
/// let rules = [
///     ("high_level", "level > 10"),
///     ("tr", "country = 'Turkey' AND level >= 10"),
/// ];
///
/// let results = BatchRunner::new().with_cache().run(rules, &record, 1_735_689_600).unwrap();
/// assert_eq!(results.get("high_level"), Some(true));
/// assert_eq!(results.get("tr"), Some(true));
/// ```
#[derive(Debug, Default)]
pub struct BatchRunner {
    cache: Option<ExprCache>,
}

impl BatchRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable the compiled-expression cache with [`DEFAULT_CACHE_CAPACITY`].
    #[must_use]
    pub fn with_cache(self) -> Self {
        self.cache_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Enable the compiled-expression cache holding at most `capacity`
    /// entries. Once full, new expressions are compiled but not stored.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = Some(ExprCache::new(capacity));
        self
    }

    /// Number of cached expressions; `0` when caching is disabled.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, ExprCache::len)
    }

    /// Evaluate every rule, aborting at the first failure.
    ///
    /// Rules are processed in iteration order and the results keep that order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SegmentError`]; no partial results are returned.
    pub fn run<I, K, V>(
        &self,
        rules: I,
        record: &Record,
        now: i64,
    ) -> Result<SegmentResults, SegmentError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let _span = debug_span!("segment_batch", now, policy = "fail_fast").entered();
        let mut results = SegmentResults::default();
        for (name, raw) in rules {
            let name = name.as_ref();
            let matched = self.evaluate_rule(name, raw.as_ref(), record, now)?;
            results.push(Verdict::new(name, matched));
        }
        Ok(results)
    }

    /// Evaluate every rule, recording each rule's result or error and
    /// continuing past failures.
    pub fn run_all<I, K, V>(&self, rules: I, record: &Record, now: i64) -> BatchReport
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let _span = debug_span!("segment_batch", now, policy = "collect_all").entered();
        let start = Instant::now();
        let outcomes = rules
            .into_iter()
            .map(|(name, raw)| {
                let name = name.as_ref();
                Outcome::new(name, self.evaluate_rule(name, raw.as_ref(), record, now))
            })
            .collect();
        BatchReport::new(outcomes, start.elapsed())
    }

    /// Normalize, parse and bind one rule, consulting the cache if enabled.
    ///
    /// Rules that call `_now()` bypass the cache: their canonical text
    /// changes with every time sample.
    ///
    /// # Errors
    ///
    /// Returns a [`SegmentError`] naming `name` if the rule does not parse or bind.
    pub fn compile(
        &self,
        name: &str,
        raw: &str,
        now: i64,
    ) -> Result<Arc<CompiledExpr>, SegmentError> {
        let Normalized {
            text: canonical,
            uses_now,
        } = normalize_rule(raw, now);
        let cache = self.cache.as_ref().filter(|_| !uses_now);
        if let Some(cache) = cache
            && let Some(hit) = cache.get(&canonical)
        {
            trace!(rule = name, canonical = %canonical, "cache hit");
            return Ok(hit);
        }

        debug!(rule = name, canonical = %canonical, "compiling rule");
        let expr = crate::parse(&canonical).map_err(|e| SegmentError::new(name, e))?;
        let compiled = Arc::new(crate::bind(&expr).map_err(|e| SegmentError::new(name, e))?);

        if let Some(cache) = cache {
            cache.insert(canonical, Arc::clone(&compiled));
        }
        Ok(compiled)
    }

    fn evaluate_rule(
        &self,
        name: &str,
        raw: &str,
        record: &Record,
        now: i64,
    ) -> Result<bool, SegmentError> {
        match self.compile(name, raw, now) {
            Ok(compiled) => {
                let matched = compiled.matches(record);
                debug!(rule = name, matched, "rule evaluated");
                Ok(matched)
            }
            Err(e) => {
                debug!(rule = name, error = %e, "rule failed");
                Err(e)
            }
        }
    }
}

#[derive(Debug)]
struct ExprCache {
    entries: RwLock<HashMap<String, Arc<CompiledExpr>>>,
    capacity: usize,
}

impl ExprCache {
    fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    fn get(&self, canonical: &str) -> Option<Arc<CompiledExpr>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(canonical).cloned()
    }

    fn insert(&self, canonical: String, compiled: Arc<CompiledExpr>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.len() < self.capacity {
            entries.entry(canonical).or_insert(compiled);
        }
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

//! The search driver.
use core::fmt;
use std::sync::Arc;

use fxhash::FxHashSet;
use grid_util::point::Point;
use log::{Level, Log, Metadata, Record};
use smallvec::SmallVec;

use crate::codec::PointCodec;
use crate::frontier::{Frontier, SearchOrder};
use crate::movement::{JumpContext, MoveMode};
use crate::path::{distance_sqr, euclidean, waypoints_to_path};
use crate::store::{CellState, CellStore};
use crate::{Error, DEFAULT_HEURISTIC_FACTOR, N_SMALLVEC_SIZE};

/// Construction-time settings of a [Finder].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderConfig {
    pub mode: MoveMode,
    pub order: SearchOrder,
    /// Weight of the Euclidean heuristic in [SearchOrder::BestFirst] searches. Values above 1 trade
    /// optimality for fewer expansions.
    pub heuristic_factor: f64,
}

impl Default for FinderConfig {
    fn default() -> FinderConfig {
        FinderConfig {
            mode: MoveMode::default(),
            order: SearchOrder::default(),
            heuristic_factor: DEFAULT_HEURISTIC_FACTOR,
        }
    }
}

impl From<MoveMode> for FinderConfig {
    fn from(mode: MoveMode) -> FinderConfig {
        FinderConfig {
            mode,
            ..FinderConfig::default()
        }
    }
}

/// Per-call options of [Finder::find]. Every call starts from these values, nothing carries over
/// from a previous search.
#[derive(Clone, Debug, Default)]
pub struct FindOptions {
    /// If the end cannot be reached, return a path to the expanded cell closest to it.
    pub nearest: bool,
    /// Cells treated as unwalkable for this search only.
    pub blocks: FxHashSet<Point>,
    /// Return the path ordered from start to end instead of from end to start.
    pub reverse_path: bool,
}

impl FindOptions {
    pub fn nearest(mut self, nearest: bool) -> Self {
        self.nearest = nearest;
        self
    }
    pub fn blocks<I: IntoIterator<Item = Point>>(mut self, blocks: I) -> Self {
        self.blocks.extend(blocks);
        self
    }
    /// Adds blocked cells given as codec keys.
    pub fn with_blocked_keys<'a, C, I>(mut self, codec: &C, keys: I) -> Result<Self, Error>
    where
        C: PointCodec,
        C::Key: 'a,
        I: IntoIterator<Item = &'a C::Key>,
    {
        for key in keys {
            self.blocks.insert(codec.decode(key)?);
        }
        Ok(self)
    }
    pub fn reverse_path(mut self, reverse_path: bool) -> Self {
        self.reverse_path = reverse_path;
        self
    }
}

/// Forwards to the logger installed for the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogFacade;

impl Log for LogFacade {
    fn enabled(&self, metadata: &Metadata) -> bool {
        log::logger().enabled(metadata)
    }
    fn log(&self, record: &Record) {
        log::logger().log(record)
    }
    fn flush(&self) {
        log::logger().flush()
    }
}

/// Jump point search over a [CellStore].
///
/// The store is reset at the start and at the end of every [find](Finder::find), so one store can
/// serve any number of consecutive searches. Anomalous inputs are reported through the injected
/// [Log] (by default the global `log` facade) and never abort a search.
pub struct Finder<S: CellStore> {
    store: S,
    config: FinderConfig,
    logger: Arc<dyn Log>,
}

impl<S: CellStore> fmt::Debug for Finder<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Finder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: CellStore> Finder<S> {
    pub fn new<T: Into<FinderConfig>>(store: S, config: T) -> Finder<S> {
        Finder {
            store,
            config: config.into(),
            logger: Arc::new(LogFacade),
        }
    }
    pub fn with_logger(mut self, logger: Arc<dyn Log>) -> Self {
        self.logger = logger;
        self
    }
    pub fn mode(&self) -> MoveMode {
        self.config.mode
    }
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }
    pub fn store(&self) -> &S {
        &self.store
    }
    /// Mutable access to the store, for example to edit terrain between searches.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
    pub fn into_store(self) -> S {
        self.store
    }

    fn log_enabled(&self, level: Level) -> bool {
        self.logger.enabled(
            &Metadata::builder()
                .level(level)
                .target(module_path!())
                .build(),
        )
    }

    fn report(&self, level: Level, args: fmt::Arguments) {
        if !self.log_enabled(level) {
            return;
        }
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(module_path!())
                .module_path_static(Some(module_path!()))
                .file_static(Some(file!()))
                .line(Some(line!()))
                .build(),
        );
    }

    /// Searches for a path from `start` to `end` and returns its jump points, excluding `start`.
    /// The end (or, with [FindOptions::nearest], the closest reachable jump point) comes first
    /// unless [FindOptions::reverse_path] is set. Returns [None] if no path exists; `start == end`
    /// gives an empty path.
    pub fn find(&mut self, start: Point, end: Point, options: &FindOptions) -> Option<Vec<Point>> {
        self.store.reset_with_blocks(&options.blocks);
        if !self.store.is_walkable(start) {
            self.report(
                Level::Warn,
                format_args!("start point {:?} is not walkable", start),
            );
        }
        if !options.nearest && !self.store.is_walkable(end) {
            self.report(
                Level::Warn,
                format_args!("end point {:?} is not walkable", end),
            );
        }

        let target = self.search(start, end, options.nearest);
        let result = target.map(|target| {
            let mut current = target;
            let mut path = std::iter::from_fn(|| {
                (current != start).then(|| {
                    let p = current;
                    current = self
                        .store
                        .parent(p)
                        .unwrap_or_else(|| panic!("broken parent chain at {:?}", p));
                    p
                })
            })
            .collect::<Vec<Point>>();
            if options.reverse_path {
                path.reverse();
            }
            path
        });
        self.store.reset();
        result
    }

    /// Like [find](Finder::find), but returns the path step by step so that consecutive points
    /// are always adjacent. The orientation follows [FindOptions::reverse_path] and `start` is
    /// excluded as well.
    pub fn find_path(
        &mut self,
        start: Point,
        end: Point,
        options: &FindOptions,
    ) -> Option<Vec<Point>> {
        let forward = options.clone().reverse_path(true);
        let waypoints = self.find(start, end, &forward)?;
        let waypoints = std::iter::once(start).chain(waypoints).collect::<Vec<_>>();
        let mut path = waypoints_to_path(&waypoints);
        path.remove(0);
        if !options.reverse_path {
            path.reverse();
        }
        Some(path)
    }

    /// Runs the frontier loop and returns the cell the path should end at.
    fn search(&mut self, start: Point, end: Point, nearest: bool) -> Option<Point> {
        let mode = self.config.mode;
        let best_first = self.config.order == SearchOrder::BestFirst;
        let mut frontier = Frontier::new(self.config.order);
        let mut closest: Option<(i64, Point)> = None;
        let mut closed = 0usize;

        // A start inside the blocked set is still expanded, but keeps its Blocked state.
        if self.store.state(start) != CellState::Blocked {
            self.store.set_state(start, CellState::Open);
        }
        self.store.set_g(start, 0.0);
        frontier.push(start, 0.0, 0.0);

        let mut found = false;
        while let Some(pos) = frontier.pop() {
            match self.store.state(pos) {
                CellState::Closed => continue,
                CellState::Blocked => {}
                _ => self.store.set_state(pos, CellState::Closed),
            }
            closed += 1;
            if pos == end {
                found = true;
                break;
            }
            if nearest {
                let d = distance_sqr(pos, end);
                if closest.map_or(true, |(best, _)| d < best) {
                    closest = Some((d, pos));
                }
            }

            let jump_points = {
                let ctx = JumpContext::new(&self.store, end);
                mode.find_neighbors(&ctx, pos)
                    .into_iter()
                    .filter_map(|n| mode.jump(&ctx, n, pos))
                    .collect::<SmallVec<[Point; N_SMALLVEC_SIZE]>>()
            };
            let g_pos = self.store.g(pos);
            for jp in jump_points {
                let state = self.store.state(jp);
                if state == CellState::Closed {
                    continue;
                }
                let g = g_pos + self.store.calc_g(pos, jp);
                if state != CellState::Open {
                    let h = if best_first {
                        let h = euclidean(jp, end) * self.config.heuristic_factor;
                        self.store.set_h(jp, h);
                        h
                    } else {
                        0.0
                    };
                    self.store.set_state(jp, CellState::Open);
                    self.store.set_g(jp, g);
                    self.store.set_parent(jp, pos);
                    frontier.push(jp, g, h);
                } else if g < self.store.g(jp) {
                    self.store.set_g(jp, g);
                    self.store.set_parent(jp, pos);
                    if frontier.requeues_improved() {
                        frontier.push(jp, g, self.store.h(jp).unwrap_or(0.0));
                    }
                }
            }
        }

        let target = if found {
            Some(end)
        } else if nearest {
            closest.map(|(_, p)| p)
        } else {
            None
        };
        if self.log_enabled(Level::Debug) {
            let outcome = match (found, target) {
                (true, _) => "reached end".to_owned(),
                (false, Some(p)) => format!("falling back to {:?}", p),
                (false, None) => "no path".to_owned(),
            };
            self.report(
                Level::Debug,
                format_args!(
                    "{} search {:?} -> {:?}: {} cells closed, {}",
                    mode, start, end, closed, outcome
                ),
            );
        }
        target
    }
}

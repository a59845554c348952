//! The tick engine (spec.md §4.4): owns the grid and all per-cell state,
//! executes the five-phase tick, and holds the generation counter `UT`.

use std::sync::Mutex;

use fluid_grid::{DynGrid, GridStorage, VectorField, ALL_DIRECTIONS};
use fluid_numeric::Numeric;
use fluid_workers::{RenderPool, RowWorkerPool};
use tracing::{debug, trace};

use crate::cell::{default_rho_for, is_wall, SOURCE};
use crate::rng::DeterministicRng;
use fluid_grid::Direction;

const GRAVITY: f64 = 0.1;
const FLOW_EPSILON: f64 = 0.0001;
const SOURCE_ATTENUATION: f64 = 0.8;

/// A `[T; 4]` per cell guarded by a per-cell mutex, used for the two
/// per-cell quantities that Phases B and D write across row boundaries
/// (spec.md §5 "Shared mutation").
struct LockedVectorField<T> {
    cells: DynGrid<Mutex<[T; 4]>>,
}

impl<T: Numeric> LockedVectorField<T> {
    fn filled(rows: usize, cols: usize, zero: T) -> Self {
        Self {
            cells: DynGrid::from_fn(rows, cols, |_, _| Mutex::new([zero; 4])),
        }
    }

    fn get(&self, x: usize, y: usize, d: Direction) -> T {
        self.cells.get(x, y).lock().unwrap()[d.index()]
    }

    fn set(&self, x: usize, y: usize, d: Direction, v: T) {
        self.cells.get(x, y).lock().unwrap()[d.index()] = v;
    }

    fn add(&self, x: usize, y: usize, d: Direction, dv: T) {
        self.cells.get(x, y).lock().unwrap()[d.index()] += dv;
    }

    fn snapshot(&self, x: usize, y: usize) -> [T; 4] {
        *self.cells.get(x, y).lock().unwrap()
    }
}

/// The per-cell tick engine, generic over the three independently
/// selectable numeric types (pressure, velocity, velocity-flow).
pub struct Engine<P: Numeric, V: Numeric, VF: Numeric> {
    rows: usize,
    cols: usize,
    field: DynGrid<u8>,
    p: DynGrid<Mutex<P>>,
    old_p: DynGrid<P>,
    velocity: LockedVectorField<V>,
    velocity_flow: VectorField<VF>,
    dirs: DynGrid<i64>,
    last_use: DynGrid<i64>,
    ut: i64,
    /// Completed-tick counter, distinct from `ut` (which advances twice per
    /// tick as a flow-propagation generation marker). This is the `T` field
    /// of the checkpoint header (spec.md §6).
    ticks: i64,
    rho: [f64; 256],
    rng: DeterministicRng,
    // Kind templates: every fresh P/V/VF value the engine constructs at
    // runtime is built via `.from_f64_like`/`.from_i64_like` relative to one
    // of these rather than `P::from_f64`/`V::zero` etc, so that a
    // runtime-tagged `Num` keeps the caller's chosen kind (Float/Fixed/...)
    // instead of silently decaying to `Num`'s `Default` (`Double`).
    p_zero: P,
    v_zero: V,
    vf_zero: VF,
}

impl<P: Numeric, V: Numeric, VF: Numeric> Engine<P, V, VF> {
    /// Build an engine from an initial character map (spec.md §3 "Lifecycle").
    /// `p_zero`/`v_zero`/`vf_zero` seed every cell's state; they are taken
    /// explicitly rather than via `Default` because a runtime-tagged
    /// numeric value's `Default` can't know which kind the caller wants
    /// (see `fluid_numeric::Num`).
    pub fn new(field_chars: Vec<Vec<u8>>, p_zero: P, v_zero: V, vf_zero: VF) -> Self {
        let rows = field_chars.len();
        let cols = field_chars.first().map_or(0, |row| row.len());
        assert!(
            field_chars.iter().all(|row| row.len() == cols),
            "field rows must all have the same length"
        );

        let mut field: DynGrid<u8> = DynGrid::new(rows, cols);
        for (x, row) in field_chars.into_iter().enumerate() {
            for (y, c) in row.into_iter().enumerate() {
                *field.get_mut(x, y) = c;
            }
        }

        let mut rho = [0.0f64; 256];
        for (c, slot) in rho.iter_mut().enumerate() {
            *slot = default_rho_for(c as u8);
        }

        let mut engine = Self {
            rows,
            cols,
            field,
            p: DynGrid::from_fn(rows, cols, |_, _| Mutex::new(p_zero)),
            old_p: DynGrid::filled(rows, cols, p_zero),
            velocity: LockedVectorField::filled(rows, cols, v_zero),
            velocity_flow: VectorField::filled(rows, cols, vf_zero),
            dirs: DynGrid::new(rows, cols),
            last_use: DynGrid::new(rows, cols),
            ut: 0,
            ticks: 0,
            rho,
            rng: DeterministicRng::new(),
            p_zero,
            v_zero,
            vf_zero,
        };
        engine.compute_dirs();
        engine
    }

    pub fn with_seed(field_chars: Vec<Vec<u8>>, p_zero: P, v_zero: V, vf_zero: VF, seed: u64) -> Self {
        let mut engine = Self::new(field_chars, p_zero, v_zero, vf_zero);
        engine.rng = DeterministicRng::from_seed(seed);
        engine
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn ut(&self) -> i64 {
        self.ut
    }

    pub fn set_ut(&mut self, ut: i64) {
        self.ut = ut;
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    pub fn set_ticks(&mut self, ticks: i64) {
        self.ticks = ticks;
    }

    /// Number of values drawn from the Phase C/E random stream so far.
    /// Persisted in checkpoints so a reload can resume the same stream
    /// (spec.md §8 testable property 5).
    pub fn rng_draws(&self) -> u64 {
        self.rng.draws()
    }

    /// Rebuild the random stream at `seed`, fast-forwarded past `draws`
    /// values already consumed by the run being resumed.
    pub fn resume_rng(&mut self, seed: u64, draws: u64) {
        self.rng = DeterministicRng::resume(seed, draws);
    }

    pub fn field_char(&self, x: usize, y: usize) -> u8 {
        *self.field.get(x, y)
    }

    pub fn set_field_char(&mut self, x: usize, y: usize, c: u8) {
        *self.field.get_mut(x, y) = c;
    }

    pub fn snapshot_field(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|x| (0..self.cols).map(|y| *self.field.get(x, y)).collect())
            .collect()
    }

    pub fn p(&self, x: usize, y: usize) -> P {
        *self.p.get(x, y).lock().unwrap()
    }

    pub fn set_p(&mut self, x: usize, y: usize, v: P) {
        *self.p.get_mut(x, y).get_mut().unwrap() = v;
    }

    pub fn velocity(&self, x: usize, y: usize, d: Direction) -> V {
        self.velocity.get(x, y, d)
    }

    /// All four velocity components at `(x, y)`, in `Direction` index order
    /// — used by checkpoint serialization.
    pub fn velocity_all(&self, x: usize, y: usize) -> [V; 4] {
        self.velocity.snapshot(x, y)
    }

    pub fn set_velocity(&mut self, x: usize, y: usize, d: Direction, v: V) {
        self.velocity.set(x, y, d, v);
    }

    pub fn set_velocity_all(&mut self, x: usize, y: usize, v: [V; 4]) {
        for d in ALL_DIRECTIONS {
            self.velocity.set(x, y, d, v[d.index()]);
        }
    }

    pub fn dirs(&self, x: usize, y: usize) -> i64 {
        *self.dirs.get(x, y)
    }

    pub fn last_use(&self, x: usize, y: usize) -> i64 {
        *self.last_use.get(x, y)
    }

    pub fn set_last_use(&mut self, x: usize, y: usize, v: i64) {
        *self.last_use.get_mut(x, y) = v;
    }

    fn is_wall_xy(&self, x: usize, y: usize) -> bool {
        is_wall(self.field_char(x, y))
    }

    fn neighbor(&self, x: usize, y: usize, d: Direction) -> (usize, usize) {
        let (dx, dy) = d.delta();
        ((x as i64 + dx as i64) as usize, (y as i64 + dy as i64) as usize)
    }

    fn rho_for(&self, x: usize, y: usize) -> f64 {
        self.rho[self.field_char(x, y) as usize]
    }

    fn compute_dirs(&mut self) {
        for x in 0..self.rows {
            for y in 0..self.cols {
                if self.is_wall_xy(x, y) {
                    continue;
                }
                let mut count = 0i64;
                for d in ALL_DIRECTIONS {
                    let (nx, ny) = self.neighbor(x, y, d);
                    if !self.is_wall_xy(nx, ny) {
                        count += 1;
                    }
                }
                *self.dirs.get_mut(x, y) = count;
            }
        }
    }

    // ---- Phase A: external forces ------------------------------------

    pub fn apply_external_forces(&self, pool: &RowWorkerPool) {
        trace!(target: "engine.gravity", "phase A");
        let g = self.v_zero.from_f64_like(GRAVITY);
        pool.run_rows(self.rows, |x| {
            for y in 0..self.cols {
                if self.is_wall_xy(x, y) {
                    continue;
                }
                let below = Direction::PosX;
                let (bx, by) = self.neighbor(x, y, below);
                if !self.is_wall_xy(bx, by) {
                    self.velocity.add(x, y, below, g);
                }
            }
        });
    }

    // ---- Phase B: pressure forces -------------------------------------

    pub fn apply_pressure_forces(&mut self, pool: &RowWorkerPool) {
        trace!(target: "engine.pressure", "phase B");
        for x in 0..self.rows {
            for y in 0..self.cols {
                let v = self.p(x, y);
                *self.old_p.get_mut(x, y) = v;
            }
        }
        let this = &*self;
        pool.run_rows(this.rows, |x| this.pressure_row(x));
    }

    fn pressure_row(&self, x: usize) {
        for y in 0..self.cols {
            if self.is_wall_xy(x, y) {
                continue;
            }
            for d in ALL_DIRECTIONS {
                let (nx, ny) = self.neighbor(x, y, d);
                if self.is_wall_xy(nx, ny) {
                    continue;
                }
                let here = *self.old_p.get(x, y);
                let there = *self.old_p.get(nx, ny);
                if there >= here {
                    continue;
                }
                let mut force = here - there;

                let opp = d.opposite();
                let rho_there = self.p_zero.from_f64_like(self.rho_for(nx, ny));
                let contr = self.velocity.get(nx, ny, opp);
                let contr_as_p = self.p_zero.from_f64_like(contr.to_f64());
                if contr_as_p * rho_there >= force {
                    let delta = self.v_zero.from_f64_like((force / rho_there).to_f64());
                    self.velocity.set(nx, ny, opp, contr - delta);
                    continue;
                }
                force = force - contr_as_p * rho_there;
                self.velocity.set(nx, ny, opp, self.v_zero.zero_like());

                let rho_here = self.p_zero.from_f64_like(self.rho_for(x, y));
                self.velocity
                    .add(x, y, d, self.v_zero.from_f64_like((force / rho_here).to_f64()));

                let dirs_here = self.p_zero.from_i64_like(self.dirs(x, y));
                let share = force / dirs_here;
                let mut guard = self.p.get(x, y).lock().unwrap();
                *guard -= share;
            }
        }
    }

    // ---- Phase C: flow propagation -------------------------------------

    pub fn apply_flow(&mut self) {
        trace!(target: "engine.flow", "phase C");
        self.velocity_flow.clear();
        loop {
            self.ut += 2;
            let mut prop = false;
            for x in 0..self.rows {
                for y in 0..self.cols {
                    if self.is_wall_xy(x, y) || self.last_use(x, y) == self.ut {
                        continue;
                    }
                    let lim = self.vf_zero.from_i64_like(1);
                    let (t, _, _) = self.propagate_flow(x, y, lim);
                    if t.is_positive() {
                        prop = true;
                    }
                }
            }
            if !prop {
                break;
            }
        }
    }

    fn propagate_flow(&mut self, x: usize, y: usize, lim: VF) -> (VF, bool, Option<(usize, usize)>) {
        self.set_last_use(x, y, self.ut - 1);
        let mut ret = self.vf_zero.zero_like();
        for d in ALL_DIRECTIONS {
            let (nx, ny) = self.neighbor(x, y, d);
            if self.is_wall_xy(nx, ny) || self.last_use(nx, ny) >= self.ut {
                continue;
            }
            let cap = self.velocity.get(x, y, d);
            let flow = self.velocity_flow.get(x, y, d.delta().0, d.delta().1);
            let cap_as_vf = self.vf_zero.from_f64_like(cap.to_f64());
            if (flow - cap_as_vf).abs().to_f64() <= FLOW_EPSILON {
                continue;
            }
            let remaining = cap_as_vf - flow;
            let vp = lim.min(remaining);

            if self.last_use(nx, ny) == self.ut - 1 {
                self.velocity_flow.add(x, y, d.delta().0, d.delta().1, vp);
                self.set_last_use(x, y, self.ut);
                return (vp, true, Some((nx, ny)));
            }

            let (t, prop, end) = loop {
                let attempt = self.propagate_flow(nx, ny, vp);
                if attempt.2 != Some((nx, ny)) {
                    break attempt;
                }
            };
            ret += t;
            if prop {
                self.velocity_flow.add(x, y, d.delta().0, d.delta().1, t);
                self.set_last_use(x, y, self.ut);
                return (t, end != Some((x, y)), end);
            }
        }
        self.set_last_use(x, y, self.ut);
        (ret, false, None)
    }

    // ---- Phase D: recalculate pressure from realized flow --------------

    pub fn recalculate_pressure(&self, pool: &RowWorkerPool) {
        trace!(target: "engine.recalc_p", "phase D");
        let this = self;
        pool.run_rows(self.rows, |x| this.recalc_row(x));
    }

    fn recalc_row(&self, x: usize) {
        for y in 0..self.cols {
            if self.is_wall_xy(x, y) {
                continue;
            }
            for d in ALL_DIRECTIONS {
                let old_v = self.velocity.get(x, y, d);
                if !old_v.is_positive() {
                    continue;
                }
                let new_v = self.velocity_flow.get(x, y, d.delta().0, d.delta().1);
                let new_v_as_v = self.v_zero.from_f64_like(new_v.to_f64());
                assert!(
                    new_v_as_v <= old_v,
                    "velocity_flow exceeded velocity at ({x},{y}) dir {d:?}"
                );
                self.velocity.set(x, y, d, new_v_as_v);

                let rho_here = self.p_zero.from_f64_like(self.rho_for(x, y));
                let mut force = self.p_zero.from_f64_like((old_v - new_v_as_v).to_f64()) * rho_here;
                if self.field_char(x, y) == SOURCE {
                    force = force * self.p_zero.from_f64_like(SOURCE_ATTENUATION);
                }

                let (fx, fy) = self.neighbor(x, y, d);
                if self.is_wall_xy(fx, fy) {
                    let dirs_here = self.p_zero.from_i64_like(self.dirs(x, y));
                    let mut guard = self.p.get(x, y).lock().unwrap();
                    *guard += force / dirs_here;
                } else {
                    let dirs_fwd = self.p_zero.from_i64_like(self.dirs(fx, fy));
                    let mut guard = self.p.get(fx, fy).lock().unwrap();
                    *guard += force / dirs_fwd;
                }
            }
        }
    }

    // ---- Phase E: random advection --------------------------------------

    pub fn random_advection(&mut self) -> bool {
        trace!(target: "engine.advect", "phase E");
        self.ut += 2;
        let mut moved = false;
        for x in 0..self.rows {
            for y in 0..self.cols {
                if self.is_wall_xy(x, y) || self.last_use(x, y) == self.ut {
                    continue;
                }
                let threshold = self.move_prob(x, y);
                let u: V = self.rng.uniform01_like(&self.v_zero);
                if u < threshold {
                    if self.propagate_move(x, y, true) {
                        moved = true;
                    }
                } else {
                    self.propagate_stop(x, y, true);
                }
            }
        }
        moved
    }

    fn move_prob(&self, x: usize, y: usize) -> V {
        let mut sum = self.v_zero.zero_like();
        for d in ALL_DIRECTIONS {
            let (nx, ny) = self.neighbor(x, y, d);
            if self.is_wall_xy(nx, ny) || self.last_use(nx, ny) == self.ut {
                continue;
            }
            let v = self.velocity.get(x, y, d);
            if v.is_negative() {
                continue;
            }
            sum += v;
        }
        sum
    }

    fn is_stoppable(&self, x: usize, y: usize) -> bool {
        for d in ALL_DIRECTIONS {
            let (nx, ny) = self.neighbor(x, y, d);
            if !self.is_wall_xy(nx, ny)
                && self.last_use(nx, ny) < self.ut - 1
                && self.velocity.get(x, y, d).is_positive()
            {
                return false;
            }
        }
        true
    }

    fn propagate_move(&mut self, x: usize, y: usize, is_first: bool) -> bool {
        self.set_last_use(x, y, self.ut - i64::from(is_first));
        let mut ret = false;
        let mut next_cell: Option<(usize, usize)> = None;

        loop {
            let zero = self.v_zero.zero_like();
            let mut tres = [zero; 4];
            let mut sum = zero;
            for (i, d) in ALL_DIRECTIONS.iter().enumerate() {
                let (fx, fy) = self.neighbor(x, y, *d);
                if self.is_wall_xy(fx, fy) || self.last_use(fx, fy) == self.ut {
                    tres[i] = sum;
                    continue;
                }
                let v = self.velocity.get(x, y, *d);
                if v.is_negative() {
                    tres[i] = sum;
                    continue;
                }
                sum += v;
                tres[i] = sum;
            }

            if sum == zero {
                break;
            }

            let u: V = self.rng.uniform01_like(&self.v_zero);
            let target = u * sum;
            let mut chosen = ALL_DIRECTIONS.len() - 1;
            for (i, &partial) in tres.iter().enumerate() {
                if partial > target {
                    chosen = i;
                    break;
                }
            }
            let d = Direction::from_index(chosen);
            let (nx, ny) = self.neighbor(x, y, d);
            next_cell = Some((nx, ny));

            assert!(self.velocity.get(x, y, d).is_positive());
            assert!(!self.is_wall_xy(nx, ny));
            assert!(self.last_use(nx, ny) < self.ut);

            ret = self.last_use(nx, ny) == self.ut - 1 || self.propagate_move(nx, ny, false);
            if ret {
                break;
            }
        }

        self.set_last_use(x, y, self.ut);

        for d in ALL_DIRECTIONS {
            let (fx, fy) = self.neighbor(x, y, d);
            if !self.is_wall_xy(fx, fy)
                && self.last_use(fx, fy) < self.ut - 1
                && self.velocity.get(x, y, d).is_negative()
                && self.is_stoppable(fx, fy)
            {
                self.propagate_stop(fx, fy, false);
            }
        }

        if ret && !is_first {
            if let Some((nx, ny)) = next_cell {
                self.swap_cells(x, y, nx, ny);
            }
        }
        ret
    }

    fn propagate_stop(&mut self, x: usize, y: usize, force: bool) {
        if !force && !self.is_stoppable(x, y) {
            return;
        }
        let mut stack = vec![(x, y)];
        self.set_last_use(x, y, self.ut);
        while let Some((cx, cy)) = stack.pop() {
            for d in ALL_DIRECTIONS {
                let (nx, ny) = self.neighbor(cx, cy, d);
                if self.is_wall_xy(nx, ny) || self.last_use(nx, ny) == self.ut {
                    continue;
                }
                if self.velocity.get(cx, cy, d).is_positive() {
                    continue;
                }
                if !self.is_stoppable(nx, ny) {
                    continue;
                }
                self.set_last_use(nx, ny, self.ut);
                stack.push((nx, ny));
            }
        }
    }

    fn swap_cells(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        let c1 = *self.field.get(x1, y1);
        let c2 = *self.field.get(x2, y2);
        *self.field.get_mut(x1, y1) = c2;
        *self.field.get_mut(x2, y2) = c1;

        {
            let mut a = self.p.get(x1, y1).lock().unwrap();
            let mut b = self.p.get(x2, y2).lock().unwrap();
            std::mem::swap(&mut *a, &mut *b);
        }
        {
            let mut a = self.velocity.cells.get(x1, y1).lock().unwrap();
            let mut b = self.velocity.cells.get(x2, y2).lock().unwrap();
            std::mem::swap(&mut *a, &mut *b);
        }
    }

    /// Run a full A-E tick (no rendering overlap); convenience wrapper for
    /// tests and for callers that don't need the render pool to overlap.
    /// Returns whether Phase E moved anything (spec.md §4.4 "Rendering
    /// trigger").
    pub fn tick(&mut self, pool: &RowWorkerPool) -> bool {
        self.apply_external_forces(pool);
        self.apply_pressure_forces(pool);
        self.apply_flow();
        self.recalculate_pressure(pool);
        let moved = self.random_advection();
        self.ticks += 1;
        debug!(target: "engine.tick", ut = self.ut, moved, "tick complete");
        moved
    }

    /// Run a full A-E tick, blocking on `render_pool` only at the boundary
    /// before Phase E (spec.md §4.4 "Rendering trigger"): Phases A-D can run
    /// while the previous tick's render job is still in flight, but Phase E
    /// never starts until that job has finished. Caps the engine at most
    /// one tick ahead of the renderer.
    pub fn tick_overlapped(&mut self, pool: &RowWorkerPool, render_pool: &RenderPool) -> bool {
        self.apply_external_forces(pool);
        self.apply_pressure_forces(pool);
        self.apply_flow();
        self.recalculate_pressure(pool);
        render_pool.wait_idle();
        let moved = self.random_advection();
        self.ticks += 1;
        debug!(target: "engine.tick", ut = self.ut, moved, "tick complete");
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(strs: &[&str]) -> Vec<Vec<u8>> {
        strs.iter().map(|s| s.as_bytes().to_vec()).collect()
    }

    fn engine(strs: &[&str]) -> Engine<f64, f64, f64> {
        Engine::new(rows(strs), 0.0, 0.0, 0.0)
    }

    #[test]
    fn wall_cells_never_acquire_state() {
        let mut e = engine(&["#####", "#   #", "#   #", "#   #", "#####"]);
        let pool = RowWorkerPool::new(1);
        for _ in 0..10 {
            e.tick(&pool);
        }
        for x in 0..e.rows() {
            for y in 0..e.cols() {
                if e.is_wall_xy(x, y) {
                    assert_eq!(e.p(x, y), 0.0);
                    for d in ALL_DIRECTIONS {
                        assert_eq!(e.velocity(x, y, d), 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn wall_cells_stay_zeroed_across_ticks() {
        let mut e = engine(&["####", "#.*#", "# *#", "####"]);
        let pool = RowWorkerPool::new(1);
        for _ in 0..5 {
            e.tick(&pool);
            for x in 0..e.rows() {
                for y in 0..e.cols() {
                    if e.is_wall_xy(x, y) {
                        assert_eq!(e.last_use(x, y), 0);
                    }
                }
            }
        }
    }

    #[test]
    fn gravity_accumulates_into_downward_velocity() {
        let mut e = engine(&["###", "#.#", "# #", "###"]);
        let pool = RowWorkerPool::new(1);
        for _ in 0..10 {
            e.tick(&pool);
        }
        assert!(e.velocity(1, 1, Direction::PosX) > 0.0);
    }

    #[test]
    fn dirs_count_is_stable_after_load() {
        let e = engine(&["#####", "#. .#", "#   #", "#####"]);
        let before: Vec<i64> = (0..e.rows())
            .flat_map(|x| (0..e.cols()).map(move |y| (x, y)))
            .map(|(x, y)| e.dirs(x, y))
            .collect();
        for (x, y) in (0..e.rows()).flat_map(|x| (0..e.cols()).map(move |y| (x, y))) {
            if !e.is_wall_xy(x, y) {
                let mut count = 0;
                for d in ALL_DIRECTIONS {
                    let (nx, ny) = e.neighbor(x, y, d);
                    if !e.is_wall_xy(nx, ny) {
                        count += 1;
                    }
                }
                assert_eq!(e.dirs(x, y), count);
            }
        }
        assert_eq!(
            before,
            (0..e.rows())
                .flat_map(|x| (0..e.cols()).map(move |y| (x, y)))
                .map(|(x, y)| e.dirs(x, y))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn same_seed_same_thread_count_independent_output() {
        let field = rows(&["######", "#.   #", "#    #", "#    #", "#    #", "######"]);
        let mut e1 = Engine::with_seed(field.clone(), 0.0f64, 0.0, 0.0, 42);
        let mut e2 = Engine::with_seed(field, 0.0f64, 0.0, 0.0, 42);
        let pool1 = RowWorkerPool::new(1);
        let pool8 = RowWorkerPool::new(8);
        for _ in 0..30 {
            e1.tick(&pool1);
            e2.tick(&pool8);
        }
        assert_eq!(e1.snapshot_field(), e2.snapshot_field());
    }

    #[test]
    fn pressure_builds_up_behind_a_blocked_source() {
        let mut e = engine(&["###", "#.#", "# #", "###"]);
        let pool = RowWorkerPool::new(1);
        for _ in 0..20 {
            e.tick(&pool);
        }
        let total_p: f64 = (0..e.rows())
            .flat_map(|x| (0..e.cols()).map(move |y| (x, y)))
            .filter(|&(x, y)| !e.is_wall_xy(x, y))
            .map(|(x, y)| e.p(x, y).abs())
            .sum();
        assert!(total_p > 0.0);
    }
}

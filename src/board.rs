use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::Point;
use crate::error::GoError;
use crate::stone::Stone;

/// Stones taken so far, indexed by the capturing color.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, stone: Stone) -> u32 {
        match stone {
            Stone::Black => self.black,
            Stone::White => self.white,
        }
    }

    fn add(&mut self, stone: Stone, count: u32) {
        match stone {
            Stone::Black => self.black += count,
            Stone::White => self.white += count,
        }
    }
}

/// Arena index of a live group. Ids are retired on capture and on merge,
/// never reused.
type GroupId = usize;

/// A maximal 4-connected set of same-colored stones.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    color: Stone,
    stones: BTreeSet<Point>,
}

/// The board: per-cell group ids plus an arena of groups.
///
/// A cell is free iff it holds no group id. Group membership is shared by
/// id: merging re-points every member cell at the surviving group, so all
/// stones of a connected group always report the same set.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<Option<GroupId>>,
    groups: Vec<Option<Group>>,
    cols: u8,
    rows: u8,
    captures: Captures,
    last_stone_placed: Option<Point>,
    last_captured_single_stone: Option<Point>,
}

impl Board {
    /// Create an empty board with the given dimensions.
    pub fn with_dimensions(cols: u8, rows: u8) -> Self {
        Board {
            cells: vec![None; cols as usize * rows as usize],
            groups: Vec::new(),
            cols,
            rows,
            captures: Captures::new(),
            last_stone_placed: None,
            last_captured_single_stone: None,
        }
    }

    // -- Accessors --

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn captures(&self) -> &Captures {
        &self.captures
    }

    pub fn last_stone_placed(&self) -> Option<Point> {
        self.last_stone_placed
    }

    pub fn last_captured_single_stone(&self) -> Option<Point> {
        self.last_captured_single_stone
    }

    pub fn on_board(&self, (col, row): Point) -> bool {
        col < self.cols && row < self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    pub fn stone_at(&self, point: Point) -> Option<Stone> {
        if self.on_board(point) {
            self.cells[self.idx(point)].map(|id| self.group_ref(id).color)
        } else {
            None
        }
    }

    /// The full membership of the group occupying a point.
    pub fn group(&self, point: Point) -> Option<&BTreeSet<Point>> {
        if self.on_board(point) {
            self.cells[self.idx(point)].map(|id| &self.group_ref(id).stones)
        } else {
            None
        }
    }

    /// The liberties of the group occupying a point (empty for a free or
    /// off-board point).
    pub fn liberties(&self, point: Point) -> Vec<Point> {
        if !self.on_board(point) {
            return Vec::new();
        }
        let Some(id) = self.cells[self.idx(point)] else {
            return Vec::new();
        };

        let mut libs = BTreeSet::new();
        for &p in &self.group_ref(id).stones {
            for n in self.neighbors(p) {
                if self.cells[self.idx(n)].is_none() {
                    libs.insert(n);
                }
            }
        }
        libs.into_iter().collect()
    }

    /// Iterate over all occupied cells in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Stone)> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (col, row)))
            .filter_map(move |p| self.stone_at(p).map(|s| (p, s)))
    }

    /// Get the 4-connected neighbors that are on the board.
    pub fn neighbors(&self, (col, row): Point) -> ArrayVec<Point, 4> {
        let mut result = ArrayVec::new();
        if col > 0 {
            result.push((col - 1, row));
        }
        if col + 1 < self.cols {
            result.push((col + 1, row));
        }
        if row > 0 {
            result.push((col, row - 1));
        }
        if row + 1 < self.rows {
            result.push((col, row + 1));
        }
        result
    }

    // -- Move application --

    /// Place a stone: resolve captures, reject ko recaptures and
    /// self-captures. Returns the captured points.
    ///
    /// Nothing is mutated until every check has passed, so an error
    /// leaves the board exactly as it was.
    pub(crate) fn place(&mut self, point: Point, stone: Stone) -> Result<Vec<Point>, GoError> {
        if !self.on_board(point) {
            return Err(GoError::InvalidCoordinate);
        }
        if self.cells[self.idx(point)].is_some() {
            return Err(GoError::CoordOccupied);
        }

        let (own, opponent) = self.adjacent_groups(point, stone);

        // Opponent groups whose last liberty is the point being played.
        let doomed: Vec<GroupId> = opponent
            .into_iter()
            .filter(|&id| !self.has_liberty_besides(id, point))
            .collect();

        self.check_ko(&doomed)?;

        if doomed.is_empty() && !self.would_have_liberty(point, &own) {
            return Err(GoError::SelfCapture);
        }

        // Commit: remove captured groups first, then merge.
        let mut dead = Vec::new();
        for &id in &doomed {
            if let Some(group) = self.groups[id].take() {
                self.captures.add(stone, group.stones.len() as u32);
                for &p in &group.stones {
                    let i = self.idx(p);
                    self.cells[i] = None;
                    dead.push(p);
                }
            }
        }
        self.last_captured_single_stone = match dead.as_slice() {
            // exactly one group fell and it was a lone stone
            [single] if doomed.len() == 1 => Some(*single),
            _ => None,
        };

        let mut stones = BTreeSet::new();
        stones.insert(point);
        for &id in &own {
            if let Some(group) = self.groups[id].take() {
                stones.extend(group.stones);
            }
        }
        let id = self.groups.len();
        for &p in &stones {
            let i = self.idx(p);
            self.cells[i] = Some(id);
        }
        self.groups.push(Some(Group { color: stone, stones }));
        self.last_stone_placed = Some(point);

        Ok(dead)
    }

    /// Forbid recapturing the stone that just captured a single stone.
    ///
    /// Only the classic single-stone ko shape is caught; multi-stone
    /// repetitions are not detected (a long-standing upstream limitation
    /// kept on purpose).
    fn check_ko(&self, doomed: &[GroupId]) -> Result<(), GoError> {
        if self.last_captured_single_stone.is_none() {
            return Ok(());
        }

        let mut target = None;
        for &id in doomed {
            let group = self.group_ref(id);
            if group.stones.len() != 1 {
                continue;
            }
            if target.is_some() {
                // Two lone stones fall at once; a ko is a 1-for-1 recapture.
                return Ok(());
            }
            target = group.stones.first().copied();
        }

        if target.is_some() && target == self.last_stone_placed {
            return Err(GoError::KoViolation);
        }
        Ok(())
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (col, row): Point) -> usize {
        row as usize * self.cols as usize + col as usize
    }

    fn group_ref(&self, id: GroupId) -> &Group {
        self.groups[id].as_ref().expect("cell points at a live group")
    }

    /// Distinct neighboring groups of a point, split into same-colored
    /// and opponent groups relative to `stone`.
    fn adjacent_groups(
        &self,
        point: Point,
        stone: Stone,
    ) -> (ArrayVec<GroupId, 4>, ArrayVec<GroupId, 4>) {
        let mut own = ArrayVec::new();
        let mut opponent = ArrayVec::new();
        for n in self.neighbors(point) {
            let Some(id) = self.cells[self.idx(n)] else {
                continue;
            };
            let bucket = if self.group_ref(id).color == stone {
                &mut own
            } else {
                &mut opponent
            };
            if !bucket.contains(&id) {
                bucket.push(id);
            }
        }
        (own, opponent)
    }

    /// Whether a group keeps at least one liberty once `point` is occupied.
    fn has_liberty_besides(&self, id: GroupId, point: Point) -> bool {
        self.group_ref(id).stones.iter().any(|&p| {
            self.neighbors(p)
                .iter()
                .any(|&n| n != point && self.cells[self.idx(n)].is_none())
        })
    }

    /// Whether the stone played at `point`, merged with its same-colored
    /// neighbor groups, would have a liberty. The played point itself
    /// does not count.
    fn would_have_liberty(&self, point: Point, own: &[GroupId]) -> bool {
        if self
            .neighbors(point)
            .iter()
            .any(|&n| self.cells[self.idx(n)].is_none())
        {
            return true;
        }
        own.iter().any(|&id| self.has_liberty_besides(id, point))
    }

    /// Test helper: build a board from an ASCII layout.
    /// 'B' = Black, 'W' = White, '+' = empty. Row 0 is the first string.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Board {
        let rows = layout.len() as u8;
        let cols = layout[0].len() as u8;
        let mut board = Board::with_dimensions(cols, rows);

        let color_at = |(col, row): Point| match layout[row as usize].as_bytes()[col as usize] {
            b'B' => Some(Stone::Black),
            b'W' => Some(Stone::White),
            _ => None,
        };

        for row in 0..rows {
            for col in 0..cols {
                let point = (col, row);
                let Some(color) = color_at(point) else {
                    continue;
                };
                if board.cells[board.idx(point)].is_some() {
                    continue;
                }

                let mut stones = BTreeSet::new();
                let mut stack = vec![point];
                while let Some(p) = stack.pop() {
                    if !stones.insert(p) {
                        continue;
                    }
                    for n in board.neighbors(p) {
                        if color_at(n) == Some(color) {
                            stack.push(n);
                        }
                    }
                }

                let id = board.groups.len();
                for &p in &stones {
                    let i = board.idx(p);
                    board.cells[i] = Some(id);
                }
                board.groups.push(Some(Group { color, stones }));
            }
        }

        board
    }
}

//! Flow Free
//!
//! Connect each pair of same-coloured endpoints with a path of orthogonal
//! steps. Paths may not cross; the level is solved when every flow is
//! connected and every cell is covered.

use glam::IVec2;

use crate::settings::Difficulty;
use crate::sim::GameStatus;
use crate::sim::collision::grid_manhattan;

/// A built-in level; endpoints are `(row, col)`
#[derive(Debug)]
pub struct LevelDef {
    pub size: i32,
    pub flows: &'static [[(i32, i32); 2]],
}

pub static EASY: [LevelDef; 2] = [
    LevelDef {
        size: 5,
        flows: &[
            [(0, 0), (1, 4)],
            [(1, 0), (1, 3)],
            [(2, 0), (4, 0)],
            [(2, 1), (4, 4)],
            [(3, 1), (4, 1)],
        ],
    },
    LevelDef {
        size: 5,
        flows: &[
            [(0, 0), (4, 4)],
            [(1, 0), (4, 3)],
            [(2, 0), (4, 2)],
            [(3, 0), (4, 0)],
        ],
    },
];

pub static MEDIUM: [LevelDef; 1] = [LevelDef {
    size: 7,
    flows: &[
        [(0, 0), (1, 6)],
        [(1, 0), (6, 6)],
        [(2, 0), (6, 0)],
        [(2, 1), (6, 5)],
        [(3, 1), (6, 4)],
        [(4, 2), (6, 3)],
    ],
}];

pub static HARD: [LevelDef; 1] = [LevelDef {
    size: 9,
    flows: &[
        [(0, 0), (1, 0)],
        [(2, 0), (3, 0)],
        [(4, 0), (5, 0)],
        [(6, 0), (6, 8)],
        [(7, 0), (8, 0)],
        [(7, 5), (8, 5)],
    ],
}];

/// Built-in level for a difficulty, falling back to the first easy level
pub fn level(difficulty: Difficulty, index: usize) -> &'static LevelDef {
    let set: &'static [LevelDef] = match difficulty {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    };
    set.get(index).unwrap_or(&EASY[0])
}

/// What occupies a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupant {
    Endpoint(usize),
    Path(usize),
}

#[derive(Debug, Clone)]
pub struct FlowFree {
    size: i32,
    ends: Vec<[IVec2; 2]>,
    /// Drawn path per flow, starting at the endpoint it was drawn from
    pub paths: Vec<Vec<IVec2>>,
    /// Flow currently being drawn
    pub active: Option<usize>,
    pub status: GameStatus,
}

impl FlowFree {
    pub fn new(difficulty: Difficulty, index: usize) -> Self {
        let def = level(difficulty, index);
        log::info!("Flow level {} #{index} ({}×{})", difficulty.as_str(), def.size, def.size);
        Self::from_level(def)
    }

    pub fn from_level(def: &LevelDef) -> Self {
        let ends: Vec<[IVec2; 2]> = def
            .flows
            .iter()
            .map(|pair| pair.map(|(row, col)| IVec2::new(col, row)))
            .collect();
        Self {
            size: def.size,
            paths: vec![Vec::new(); ends.len()],
            ends,
            active: None,
            status: GameStatus::Playing,
        }
    }

    /// Clear every drawn path
    pub fn reset(&mut self) {
        self.paths.iter_mut().for_each(Vec::clear);
        self.active = None;
        self.status = GameStatus::Playing;
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn endpoints(&self) -> &[[IVec2; 2]] {
        &self.ends
    }

    fn in_bounds(&self, cell: IVec2) -> bool {
        cell.cmpge(IVec2::ZERO).all() && cell.cmplt(IVec2::splat(self.size)).all()
    }

    /// Endpoints take precedence over path cells
    pub fn occupant(&self, cell: IVec2) -> Option<Occupant> {
        if let Some(flow) = self.ends.iter().position(|e| e.contains(&cell)) {
            return Some(Occupant::Endpoint(flow));
        }
        self.paths
            .iter()
            .position(|p| p.contains(&cell))
            .map(Occupant::Path)
    }

    fn is_connected(&self, flow: usize) -> bool {
        let (Some(first), Some(last)) = (self.paths[flow].first(), self.paths[flow].last()) else {
            return false;
        };
        let [a, b] = self.ends[flow];
        self.paths[flow].len() >= 2 && ((*first == a && *last == b) || (*first == b && *last == a))
    }

    /// Start drawing: an endpoint restarts its flow, a path cell truncates there
    pub fn press(&mut self, cell: IVec2) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        match self.occupant(cell) {
            Some(Occupant::Endpoint(flow)) => {
                self.paths[flow] = vec![cell];
                self.active = Some(flow);
                true
            }
            Some(Occupant::Path(flow)) => {
                truncate_at(&mut self.paths[flow], cell);
                self.active = Some(flow);
                true
            }
            None => false,
        }
    }

    /// Continue the active path into an orthogonal neighbour
    pub fn drag(&mut self, cell: IVec2) -> bool {
        let Some(flow) = self.active else { return false };
        if self.status.is_terminal() || !self.in_bounds(cell) {
            return false;
        }
        let occupant = self.occupant(cell);
        let connected = self.is_connected(flow);

        let path = &mut self.paths[flow];
        let Some(&last) = path.last() else { return false };
        if grid_manhattan(cell, last) != 1 {
            return false;
        }

        if path.len() > 1 && path[path.len() - 2] == cell {
            path.pop();
            return true;
        }
        if connected {
            return false;
        }

        match occupant {
            None => {
                path.push(cell);
                true
            }
            Some(Occupant::Endpoint(f)) if f == flow && path[0] != cell => {
                path.push(cell);
                true
            }
            Some(Occupant::Path(f)) if f == flow => truncate_at(path, cell),
            _ => false,
        }
    }

    /// Stop drawing and check for a solved board
    pub fn release(&mut self) -> GameStatus {
        if self.active.take().is_some() && self.is_solved() {
            self.status = GameStatus::Won;
            log::info!("Flow level solved");
        }
        self.status
    }

    pub fn is_solved(&self) -> bool {
        let connected = (0..self.ends.len()).all(|f| self.is_connected(f));
        let covered = (0..self.size)
            .flat_map(|y| (0..self.size).map(move |x| IVec2::new(x, y)))
            .all(|cell| self.occupant(cell).is_some());
        connected && covered
    }
}

fn truncate_at(path: &mut Vec<IVec2>, cell: IVec2) -> bool {
    match path.iter().position(|&p| p == cell) {
        Some(i) => {
            path.truncate(i + 1);
            true
        }
        None => false,
    }
}

use crate::board::Position;
use crate::evaluation::Evaluator;
use crate::moves::{Move, MoveGenerator};
use crate::pieces::Color;
use crate::search::ordering::{self, KillerTable};
use crate::search::repetition::RepetitionMap;
use crate::utils::ZobristHash;

/// Sentinel magnitude for a won/lost/unbounded search value, matching the
/// evaluator's own terminal score so search and evaluation stay on one
/// numeric scale.
const INF: f32 = 999.0;

/// Which search-side techniques are active. `NESTED`/`HISTORY`/`PVS` from
/// the original bitmask are reserved and have no corresponding fields --
/// they name variants this kernel does not implement (see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchFeatures {
    pub alpha_beta: bool,
    pub sort: bool,
    pub killer: bool,
}

impl SearchFeatures {
    pub const PLAIN: SearchFeatures = SearchFeatures { alpha_beta: false, sort: false, killer: false };
    pub const ALPHA_BETA_SORT_KILLER: SearchFeatures =
        SearchFeatures { alpha_beta: true, sort: true, killer: true };
}

/// What a root `search_move` call returns: the chosen move (`None` when
/// the search was handed depth `0` or a position with no legal moves),
/// its score in the side-relative convention, and whatever killer moves
/// were discovered along the way.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best: Option<Move>,
    pub score: f32,
    pub killers: KillerTable,
}

fn evaluate_white_relative(evaluator: &Evaluator, position: &Position) -> f32 {
    evaluator.evaluate(position, Color::White)
}

/// Plain minimax: White nodes maximize, Black nodes minimize, both read
/// off the White-relative evaluator value. Consults the repetition map on
/// every child (the slower of the two search variants, traded for safety
/// against voluntarily walking into a draw).
fn minmax(
    position: &mut Position,
    generator: &MoveGenerator,
    evaluator: &Evaluator,
    depth: u8,
    repetition: &RepetitionMap,
    zobrist: &ZobristHash,
) -> (f32, Option<Move>) {
    let white_to_move = position.side_to_move() == Color::White;

    if depth == 0 {
        return (evaluate_white_relative(evaluator, position), None);
    }
    let moves = generator.generate_legal_moves(position);
    if moves.is_empty() {
        return (evaluate_white_relative(evaluator, position), None);
    }

    let mut value = if white_to_move { -INF } else { INF };
    let mut best = None;

    for mv in moves {
        position.apply_move(mv).expect("legal move generator produced an illegal move");
        if repetition.is_locked(position, zobrist) {
            position.undo_last_move().expect("undo after locked-position skip");
            continue;
        }
        let (child_value, _) = minmax(position, generator, evaluator, depth - 1, repetition, zobrist);
        position.undo_last_move().expect("undo after recursive minmax call");

        let improves = if white_to_move { child_value > value } else { child_value < value };
        let adopt_tie = best.is_none() && child_value == value;
        if improves || adopt_tie {
            value = child_value;
            best = Some(mv);
        }
    }

    (value, best)
}

/// Alpha-beta with fail-hard bound propagation. Does not consult the
/// repetition map mid-recursion (only `search_move`'s root wrapping
/// touches it) -- that's the speed trade the plain minimax variant above
/// declines to make.
#[allow(clippy::too_many_arguments)]
fn alphabeta(
    position: &mut Position,
    generator: &MoveGenerator,
    evaluator: &Evaluator,
    depth: u8,
    mut alpha: f32,
    mut beta: f32,
    sort: bool,
    killer_enabled: bool,
    killers: &mut KillerTable,
) -> (f32, Option<Move>) {
    let white_to_move = position.side_to_move() == Color::White;

    if depth == 0 {
        return (evaluate_white_relative(evaluator, position), None);
    }
    let mut moves = generator.generate_legal_moves(position);
    if moves.is_empty() {
        return (evaluate_white_relative(evaluator, position), None);
    }
    if sort {
        ordering::sort_moves(&mut moves, position, depth, killers, killer_enabled);
    }

    let mut value = if white_to_move { -INF } else { INF };
    let mut best = None;

    for mv in moves {
        position.apply_move(mv).expect("legal move generator produced an illegal move");
        let (child_value, _) =
            alphabeta(position, generator, evaluator, depth - 1, alpha, beta, sort, killer_enabled, killers);
        position.undo_last_move().expect("undo after recursive alphabeta call");

        if white_to_move {
            if child_value > alpha {
                value = child_value;
                best = Some(mv);
                alpha = value;
                if alpha >= beta {
                    if killer_enabled {
                        killers.record(depth, mv);
                    }
                    break;
                }
            }
        } else if child_value < beta {
            value = child_value;
            best = Some(mv);
            beta = value;
            if beta <= alpha {
                if killer_enabled {
                    killers.record(depth, mv);
                }
                break;
            }
        }
    }

    (value, best)
}

/// The kernel's single public entry point: picks a move for `position` at
/// `depth` plies, dispatching to plain minimax (flags `0` or `SORT` alone)
/// or alpha-beta (flag `ALPHA_BETA`, optionally honoring `SORT`/`KILLER`).
/// Inserts the root position into `repetition` before searching and the
/// resulting position after, then restores `position` to the state it
/// held on entry.
pub fn search_move(
    position: &mut Position,
    generator: &MoveGenerator,
    evaluator: &Evaluator,
    depth: u8,
    features: SearchFeatures,
    repetition: &mut RepetitionMap,
    zobrist: &ZobristHash,
) -> SearchResult {
    log::debug!(
        "search_move: depth={depth} side_to_move={:?} alpha_beta={} sort={} killer={}",
        position.side_to_move(),
        features.alpha_beta,
        features.sort,
        features.killer
    );
    repetition.add_position(position, zobrist);

    let root_is_white = position.side_to_move() == Color::White;
    let mut killers = KillerTable::new();

    let (white_relative_score, best) = if features.alpha_beta {
        alphabeta(position, generator, evaluator, depth, -INF, INF, features.sort, features.killer, &mut killers)
    } else {
        minmax(position, generator, evaluator, depth, repetition, zobrist)
    };

    if let Some(mv) = best {
        position.apply_move(mv).expect("search chose an illegal move");
        repetition.add_position(position, zobrist);
        position.undo_last_move().expect("undo after recording the chosen move");
    }

    let score = if root_is_white { white_relative_score } else { -white_relative_score };
    log::trace!("search_move result: best={best:?} score={score}");

    SearchResult { best, score, killers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Square;

    fn setup() -> (MoveGenerator, Evaluator, RepetitionMap, ZobristHash) {
        (
            MoveGenerator::new(),
            Evaluator::new(crate::evaluation::EvaluationFeatures::STANDARD),
            RepetitionMap::new(),
            ZobristHash::new(),
        )
    }

    #[test]
    fn test_material_only_root_score() {
        let (generator, evaluator, mut repetition, zobrist) = setup();
        let material_only_eval = Evaluator::new(crate::evaluation::EvaluationFeatures {
            material_dynamic_game_phase: false,
            piece_square_tables: false,
            piece_mobility: false,
            pawn_structure: false,
            bishop_pair: false,
            dynamic_pawns: false,
        });
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        let result = search_move(
            &mut pos,
            &generator,
            &material_only_eval,
            4,
            SearchFeatures::ALPHA_BETA_SORT_KILLER,
            &mut repetition,
            &zobrist,
        );
        assert!((result.score - 1.0).abs() < 0.01);
        let _ = evaluator;
    }

    #[test]
    fn test_alpha_beta_matches_minmax_value() {
        let (generator, evaluator, mut repetition, zobrist) = setup();
        let mut pos1 = Position::starting_position();
        let mut pos2 = pos1.clone();

        let ab = search_move(&mut pos1, &generator, &evaluator, 2, SearchFeatures::ALPHA_BETA_SORT_KILLER, &mut repetition.clone(), &zobrist);
        let plain = search_move(&mut pos2, &generator, &evaluator, 2, SearchFeatures::PLAIN, &mut repetition, &zobrist);
        assert!((ab.score - plain.score).abs() < 0.001);
    }

    #[test]
    fn test_mate_in_one_found() {
        let (generator, evaluator, mut repetition, zobrist) = setup();
        // Black king boxed in by its own pawns; Rd1-d8 is back-rank mate.
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/3R2K1 w - - 0 1").unwrap();
        let result = search_move(&mut pos, &generator, &evaluator, 2, SearchFeatures::ALPHA_BETA_SORT_KILLER, &mut repetition, &zobrist);
        assert_eq!(result.score, 999.0);
        let mv = result.best.unwrap();
        pos.apply_move(mv).unwrap();
        assert_eq!(generator.game_state(&pos), crate::board::GameState::WhiteWins);
    }

    #[test]
    fn test_stalemate_returns_none() {
        let (generator, evaluator, mut repetition, zobrist) = setup();
        let mut pos = Position::from_fen("7k/8/6Q1/8/8/8/8/6K1 b - - 0 1").unwrap();
        let result = search_move(&mut pos, &generator, &evaluator, 3, SearchFeatures::ALPHA_BETA_SORT_KILLER, &mut repetition, &zobrist);
        assert_eq!(result.best, None);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_depth_zero_returns_none() {
        let (generator, evaluator, mut repetition, zobrist) = setup();
        let mut pos = Position::starting_position();
        let result = search_move(&mut pos, &generator, &evaluator, 0, SearchFeatures::ALPHA_BETA_SORT_KILLER, &mut repetition, &zobrist);
        assert_eq!(result.best, None);
    }

    #[test]
    fn test_repetition_lock_reported_after_third_visit() {
        let mut repetition = RepetitionMap::new();
        let zobrist = ZobristHash::new();
        let pos = Position::starting_position();
        repetition.add_position(&pos, &zobrist);
        repetition.add_position(&pos, &zobrist);
        repetition.add_position(&pos, &zobrist);
        assert!(repetition.is_locked(&pos, &zobrist));
        let _ = Square::E4;
    }
}

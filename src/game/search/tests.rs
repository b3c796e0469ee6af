use super::*;
use crate::game::evaluation::{evaluate, evaluate_move, is_endgame, side_sign};
use crate::game::tests::{position, random_positions, uci};
use crate::game::GameOutcome;

const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
const STALEMATE: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

fn context() -> SearchContext {
    SearchContext::new(&SearchConfig::default())
}

fn engine(algorithm: SearchAlgorithm) -> Engine {
    Engine::new(SearchConfig { search_algorithm: algorithm, ..Default::default() })
}

const STRATEGIES: [SearchAlgorithm; 2] = [SearchAlgorithm::Negamax, SearchAlgorithm::Negascout];

#[test]
fn test_checkmate_is_minus_infinity_for_any_window() {
    let pos = position(FOOLS_MATE);
    for algorithm in STRATEGIES {
        for depth in 0..3 {
            for (alpha, beta) in [(-INFINITY, INFINITY), (-50, 50), (10, 11)] {
                let score = strategy(algorithm).search(&mut context(), &pos, depth, alpha, beta);
                assert_eq!(score, -INFINITY, "{algorithm:?} depth {depth}");
            }
        }
    }
}

#[test]
fn test_stalemate_is_zero_for_any_window() {
    let pos = position(STALEMATE);
    for algorithm in STRATEGIES {
        for depth in 0..3 {
            for (alpha, beta) in [(-INFINITY, INFINITY), (100, 200), (-300, -299)] {
                let score = strategy(algorithm).search(&mut context(), &pos, depth, alpha, beta);
                assert_eq!(score, 0, "{algorithm:?} depth {depth}");
            }
        }
    }
}

#[test]
fn test_search_stays_inside_window() {
    let windows = [(-INFINITY, INFINITY), (-100, 100), (0, 1), (-30, -29), (200, 400), (-500, -200)];
    for pos in random_positions(6, 16, 21) {
        for algorithm in STRATEGIES {
            for depth in 0..3 {
                for (alpha, beta) in windows {
                    let score = strategy(algorithm).search(&mut context(), &pos, depth, alpha, beta);
                    assert!(
                        alpha <= score && score <= beta,
                        "{algorithm:?} depth {depth} returned {score} outside [{alpha}, {beta}]"
                    );
                }
            }
        }
    }
}

#[test]
fn test_negascout_matches_negamax() {
    let mut positions = random_positions(5, 20, 31);
    positions.push(Chess::default());
    positions.push(position("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4"));

    for pos in positions {
        for depth in 1..=3 {
            let full = (-INFINITY, INFINITY);
            let negamax = Negamax.search(&mut context(), &pos, depth, full.0, full.1);
            let negascout = Negascout.search(&mut context(), &pos, depth, full.0, full.1);
            assert_eq!(negamax, negascout, "depth {depth}");
        }
    }
}

#[test]
fn test_driver_agrees_across_strategies() {
    for pos in random_positions(5, 12, 41) {
        let a = engine(SearchAlgorithm::Negamax).find_best_move(&pos, 2).unwrap();
        let b = engine(SearchAlgorithm::Negascout).find_best_move(&pos, 2).unwrap();
        assert_eq!(a.best_move, b.best_move);
        assert_eq!(a.score, b.score);
    }
}

#[test]
fn test_quiescence_stand_pat_floor() {
    for pos in random_positions(20, 24, 51) {
        let stand_pat = evaluate(&pos);
        for (alpha, beta) in [(-INFINITY, INFINITY), (-200, 200), (stand_pat - 1, stand_pat + 1)] {
            let score = quiescence::search(&mut context(), &pos, alpha, beta);
            assert!(score >= alpha.max(stand_pat).min(beta));
            assert!(score <= beta);
        }
    }
}

#[test]
fn test_quiescence_resolves_hanging_queen() {
    // White to move can win the queen on d5 with the e4 pawn.
    let pos = position("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let stand_pat = evaluate(&pos);
    let score = quiescence::search(&mut context(), &pos, -INFINITY, INFINITY);
    assert!(stand_pat < 0);
    assert!(score > 0);
}

#[test]
fn test_quiescence_cap_falls_back_to_stand_pat() {
    let pos = position("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let config = SearchConfig { max_quiescence_depth: 0, ..Default::default() };
    let mut ctx = SearchContext::new(&config);
    let score = quiescence::search(&mut ctx, &pos, -INFINITY, INFINITY);
    assert_eq!(score, evaluate(&pos));
    assert!(ctx.quiescence_cap_hit());
}

#[test]
fn test_stand_pat_cutoff_returns_beta() {
    let pos = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    assert!(evaluate(&pos) > 100);
    assert_eq!(quiescence::search(&mut context(), &pos, -100, 100), 100);
}

#[test]
fn test_order_moves_is_stable() {
    for pos in random_positions(10, 10, 61) {
        let endgame = is_endgame(pos.board());
        let sign = side_sign(pos.turn());
        let original: Vec<Move> = pos.legal_moves().into_iter().collect();
        let mut ordered = original.clone();
        ordering::order_moves(&mut ordered, &pos);

        let key = |m: &Move| evaluate_move(m, endgame, &pos) * sign;
        let index_of = |m: &Move| original.iter().position(|o| o == m).unwrap();
        for pair in ordered.windows(2) {
            assert!(key(&pair[0]) >= key(&pair[1]));
            if key(&pair[0]) == key(&pair[1]) {
                assert!(index_of(&pair[0]) < index_of(&pair[1]));
            }
        }
    }
}

#[test]
fn test_order_moves_puts_promotions_first() {
    for fen in ["8/P7/8/8/8/8/8/k6K w - - 0 1", "k6K/8/8/8/8/8/p7/8 b - - 0 1"] {
        let pos = position(fen);
        let mut moves = pos.legal_moves();
        ordering::order_moves(&mut moves, &pos);
        assert!(moves[..4].iter().all(|m| m.is_promotion()), "{fen}");
        assert!(moves[4..].iter().all(|m| !m.is_promotion()), "{fen}");
    }
}

#[test]
fn test_order_moves_prefers_winning_captures() {
    let pos = position("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let mut moves = pos.legal_moves();
    ordering::order_moves(&mut moves, &pos);
    assert_eq!(moves[0], uci(&pos, "e4d5"));
}

#[test]
fn test_find_best_move_from_start() {
    for algorithm in STRATEGIES {
        let outcome = engine(algorithm).find_best_move(&Chess::default(), 1).unwrap();
        let best = outcome.best_move.expect("the start position has 20 legal moves");
        assert!(Chess::default().legal_moves().contains(&best));
        assert!(outcome.score.abs() < INFINITY);
        assert!(outcome.nodes > 0);
    }
}

#[test]
fn test_find_best_move_terminal_roots() {
    let outcome = Engine::default().find_best_move(&position(FOOLS_MATE), 3).unwrap();
    assert_eq!(outcome, SearchOutcome { best_move: None, score: -INFINITY, nodes: 0 });

    let outcome = Engine::default().find_best_move(&position(STALEMATE), 3).unwrap();
    assert_eq!(outcome, SearchOutcome { best_move: None, score: 0, nodes: 0 });
}

#[test]
fn test_find_best_move_rejects_bad_depth() {
    let pos = Chess::default();
    assert_eq!(
        Engine::default().find_best_move(&pos, 0),
        Err(SearchError::InvalidDepth { depth: 0, max: MAX_SEARCH_DEPTH })
    );
    assert_eq!(
        Engine::default().find_best_move(&pos, MAX_SEARCH_DEPTH + 1),
        Err(SearchError::InvalidDepth { depth: MAX_SEARCH_DEPTH + 1, max: MAX_SEARCH_DEPTH })
    );
}

#[test]
fn test_finds_mate_in_one() {
    // Scholar's mate: Qxf7#.
    let pos = position("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4");
    for algorithm in STRATEGIES {
        for depth in 1..=2 {
            let outcome = engine(algorithm).find_best_move(&pos, depth).unwrap();
            assert_eq!(outcome.best_move, Some(uci(&pos, "h5f7")), "{algorithm:?} depth {depth}");
            assert_eq!(outcome.score, INFINITY);
        }
    }
}

#[test]
fn test_avoids_stalemating_when_winning() {
    // Qf7 would stalemate; every other sensible queen move keeps a won position.
    let pos = position("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1");
    let stalemating = uci(&pos, "f1f7");
    for algorithm in STRATEGIES {
        let outcome = engine(algorithm).find_best_move(&pos, 1).unwrap();
        assert_ne!(outcome.best_move, Some(stalemating));
        assert!(outcome.score > 0);
    }
}

#[test]
fn test_root_tie_break_policies() {
    // Bare kings: every move leads to a drawn position scored 0.
    let pos = position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    let mut ordered = pos.legal_moves();
    ordering::order_moves(&mut ordered, &pos);

    let first = Engine::new(SearchConfig { root_tie_break: TieBreak::FirstFound, ..Default::default() })
        .find_best_move(&pos, 2)
        .unwrap();
    let last = Engine::new(SearchConfig { root_tie_break: TieBreak::LastFound, ..Default::default() })
        .find_best_move(&pos, 2)
        .unwrap();

    assert_eq!(first.score, 0);
    assert_eq!(last.score, 0);
    assert_eq!(first.best_move, ordered.first().copied());
    assert_eq!(last.best_move, ordered.last().copied());
}

#[test]
fn test_node_limit_aborts_search() {
    let config = SearchConfig { max_nodes: Some(10), ..Default::default() };
    let result = Engine::new(config).find_best_move(&Chess::default(), 3);
    assert_eq!(result, Err(SearchError::NodeLimitExceeded { limit: 10 }));
}

#[test]
fn test_node_limit_is_not_hit_when_generous() {
    let config = SearchConfig { max_nodes: Some(10_000_000), ..Default::default() };
    assert!(Engine::new(config).find_best_move(&Chess::default(), 2).is_ok());
}

#[test]
fn test_play_best_move_advances_game() {
    let engine = Engine::default();
    let mut game = GameState::new();
    for ply in 0..6 {
        let outcome = engine.play_best_move(&mut game, 2).unwrap();
        assert!(outcome.best_move.is_some());
        assert_eq!(game.moves().len(), ply + 1);
        assert_eq!(game.moves().last().copied(), outcome.best_move);
        assert_ne!(status(game.position()), Status::Stalemate);
    }
}

#[test]
fn test_play_best_move_is_noop_when_game_over() {
    let mut game = GameState::from_position(position(FOOLS_MATE));
    let outcome = Engine::default().play_best_move(&mut game, 2).unwrap();
    assert_eq!(outcome.best_move, None);
    assert_eq!(outcome.score, -INFINITY);
    assert!(game.moves().is_empty());
}

#[test]
fn test_play_best_move_claims_repetition_when_losing() {
    // White is the exchange down. After the shuffle below, Nf3-g1 brings back
    // the start position for the third time, which White takes as a draw.
    let mut game = GameState::from_position(position("r5k1/8/8/8/8/8/8/6NK b - - 0 1"));
    for m in ["g8h8", "g1f3", "h8g8", "f3g1", "g8h8", "g1f3", "h8g8"] {
        let mv = uci(game.position(), m);
        game.make_move(mv).unwrap();
    }

    let back = uci(game.position(), "f3g1");
    let mut successor = game.position().clone();
    successor.play_unchecked(back);
    assert!(game.would_claim_draw(&successor));

    let outcome = Engine::default().play_best_move(&mut game, 1).unwrap();
    assert_eq!(outcome.score, 0);
    assert_eq!(outcome.best_move, Some(back));
    assert_eq!(game.outcome(), Some(GameOutcome::ThreefoldRepetition));
}

// Black to move next is mated by Ra8, which is also the hundredth halfmove.
const MATE_ON_FIFTIETH_MOVE: &str = "7k/8/6K1/8/8/8/8/R7 w - - 99 80";

#[test]
fn test_find_best_move_prefers_mate_over_fifty_move_claim() {
    let pos = position(MATE_ON_FIFTIETH_MOVE);
    for algorithm in STRATEGIES {
        let outcome = engine(algorithm).find_best_move(&pos, 1).unwrap();
        assert_eq!(outcome.best_move, Some(uci(&pos, "a1a8")), "{algorithm:?}");
        assert_eq!(outcome.score, INFINITY);
    }
}

#[test]
fn test_play_best_move_prefers_mate_over_fifty_move_claim() {
    let mut game = GameState::from_position(position(MATE_ON_FIFTIETH_MOVE));
    let outcome = Engine::default().play_best_move(&mut game, 1).unwrap();
    assert_eq!(outcome.score, INFINITY);
    assert_eq!(game.outcome(), Some(GameOutcome::Checkmate { winner: shakmaty::Color::White }));
}

#[test]
fn test_find_best_move_claims_fifty_move_draw_when_losing() {
    // White is the exchange down; every reply is a quiet move that reaches
    // the hundredth halfmove.
    let fen = "r5k1/8/8/8/8/8/8/6NK w - - 99 80";
    for algorithm in STRATEGIES {
        let outcome = engine(algorithm).find_best_move(&position(fen), 2).unwrap();
        assert_eq!(outcome.score, 0, "{algorithm:?}");
        assert!(outcome.best_move.is_some());
    }

    let fresh = engine(SearchAlgorithm::Negamax)
        .find_best_move(&position("r5k1/8/8/8/8/8/8/6NK w - - 0 80"), 2)
        .unwrap();
    assert!(fresh.score < 0);
}

#[test]
fn test_game_errors_pass_through_search_error() {
    let mut game = GameState::new();
    let illegal = Move::Normal {
        role: shakmaty::Role::Pawn,
        from: shakmaty::Square::E2,
        capture: None,
        to: shakmaty::Square::E5,
        promotion: None,
    };
    let err = SearchError::from(game.make_move(illegal).unwrap_err());
    assert!(matches!(err, SearchError::Game(GameError::IllegalMove { .. })));
    assert!(err.to_string().starts_with("illegal move e2e5"));
}

#[cfg(test)]
mod tests {
    mod bmf {
        use proptest::prelude::*;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        use crate::bmf::{
            decode, encode, generate_with_witness, BitMatrix, BmfError, BmfSession, BmfSettings, DecodeError, Mode,
            PlayerState, Selector, TileHint,
        };
        use crate::SolveTransition;

        fn two_by_two_or() -> BmfSession {
            let settings = BmfSettings::new(2, 1, Mode::Or).unwrap();
            BmfSession::with_target(settings, BitMatrix::from_rows(&[[1u8, 0], [1, 0]]).unwrap()).unwrap()
        }

        #[test]
        fn encode_small_board() {
            let settings = BmfSettings::new(2, 1, Mode::Or).unwrap();
            let target = BitMatrix::from_rows(&[[1u8, 0], [1, 0]]).unwrap();
            assert_eq!(encode(&settings, &target), "210A");

            assert_eq!(decode("210A").unwrap(), (settings, target.clone()));
            assert_eq!(decode("210a").unwrap(), (settings, target.clone()));
            // bits beyond the board are ignored
            assert_eq!(decode("210AF").unwrap(), (settings, target));
        }

        #[test]
        fn decode_pads_short_board() {
            let (settings, target) = decode("210").unwrap();
            assert_eq!(settings.n(), 2);
            assert_eq!(target, BitMatrix::zeros(2));
        }

        #[test]
        fn decode_rejections() {
            assert_eq!(decode(""), Err(DecodeError::Empty));
            assert_eq!(decode("2G0"), Err(DecodeError::NotHex { position: 1, found: 'G' }));
            assert_eq!(decode("21"), Err(DecodeError::HeaderTruncated { bits: 8 }));
            assert_eq!(decode("110"), Err(DecodeError::SideOutOfRange(1)));
            assert_eq!(decode("B10"), Err(DecodeError::SideOutOfRange(11)));
            assert_eq!(decode("200"), Err(DecodeError::RankOutOfRange(0)));
            assert_eq!(decode("270"), Err(DecodeError::RankOutOfRange(7)));
            assert_eq!(decode("212"), Err(DecodeError::BadModeFlag(2)));
        }

        #[test]
        fn solve_tutorial() {
            let mut session = BmfSession::from_code("4215BE5").unwrap();
            assert_eq!(session.settings().n(), 4);
            assert_eq!(session.settings().r(), 2);
            assert_eq!(session.settings().mode(), Mode::Xor);
            assert_eq!(format!("{}", session.target()), ".#.#
#.##
###.
.#.#
");

            let mut transitions = Vec::new();
            for index in [1, 2] {
                transitions.push(session.toggle(Selector::Row, index).unwrap());
            }
            for index in [0, 2, 3] {
                transitions.push(session.toggle(Selector::Column, index).unwrap());
            }
            transitions.push(session.select_layer(1).unwrap());
            for index in [0, 2, 3] {
                transitions.push(session.toggle(Selector::Row, index).unwrap());
            }
            for index in [1, 3] {
                transitions.push(session.toggle(Selector::Column, index).unwrap());
            }

            assert_eq!(transitions.last(), Some(&SolveTransition::Solved { first: true }));
            assert!(session.is_solved());
            assert_eq!(session.player_matrix(), *session.target());
        }

        #[test]
        fn solved_is_sticky() {
            let mut session = two_by_two_or();

            assert_eq!(session.toggle(Selector::Row, 0).unwrap(), SolveTransition::Unchanged);
            assert_eq!(session.toggle(Selector::Row, 1).unwrap(), SolveTransition::Unchanged);
            assert_eq!(session.toggle(Selector::Column, 0).unwrap(), SolveTransition::Solved { first: true });

            assert_eq!(session.toggle(Selector::Column, 0).unwrap(), SolveTransition::Unsolved);
            assert!(!session.is_solved());
            assert!(session.was_solved());

            assert_eq!(session.toggle(Selector::Column, 0).unwrap(), SolveTransition::Solved { first: false });
            assert_eq!(session.clear(), SolveTransition::Unsolved);
            assert!(session.was_solved());
        }

        #[test]
        fn out_of_range_actions() {
            let mut session = two_by_two_or();
            assert_eq!(session.toggle(Selector::Row, 2), Err(BmfError::ToggleOutOfRange { index: 2, n: 2 }));
            assert_eq!(session.select_layer(1), Err(BmfError::LayerOutOfRange { layer: 1, r: 1 }));
            assert_eq!(session.state().compose(Mode::Or), BitMatrix::zeros(2));

            let code = session.encode();
            assert!(matches!(session.load_code("ZZZ"), Err(BmfError::Decode(DecodeError::NotHex { .. }))));
            assert_eq!(session.encode(), code);
        }

        #[test]
        fn or_hints() {
            let mut session = two_by_two_or();
            session.toggle(Selector::Row, 0).unwrap();
            session.toggle(Selector::Column, 0).unwrap();
            session.toggle(Selector::Column, 1).unwrap();

            assert_eq!(session.hint(0, 0), Some(TileHint::Good));
            assert_eq!(session.hint(0, 1), Some(TileHint::Bad));
            assert_eq!(session.hint(1, 0), Some(TileHint::Want));
            assert_eq!(session.hint(1, 1), Some(TileHint::Zero));
            assert_eq!(session.hint(2, 0), None);
        }

        #[test]
        fn xor_hints() {
            let settings = BmfSettings::new(2, 1, Mode::Xor).unwrap();
            let mut session = BmfSession::with_target(settings, BitMatrix::from_rows(&[[1u8, 0], [0, 0]]).unwrap()).unwrap();

            assert_eq!(session.hint(0, 0), Some(TileHint::Want));
            assert_eq!(session.hint(0, 1), Some(TileHint::Zero));

            session.toggle(Selector::Row, 0).unwrap();
            session.toggle(Selector::Column, 0).unwrap();
            session.toggle(Selector::Column, 1).unwrap();

            assert_eq!(session.hint(0, 0), Some(TileHint::Good));
            assert_eq!(session.hint(0, 1), Some(TileHint::Bad));
        }

        #[test]
        fn hints_for_other_layers() {
            let settings = BmfSettings::new(2, 2, Mode::Or).unwrap();
            let mut session = BmfSession::with_target(settings, BitMatrix::from_rows(&[[1u8, 0], [1, 0]]).unwrap()).unwrap();
            session.toggle(Selector::Row, 0).unwrap();
            session.toggle(Selector::Column, 0).unwrap();
            session.select_layer(1).unwrap();
            session.toggle(Selector::Row, 1).unwrap();
            assert_eq!(session.toggle(Selector::Column, 0).unwrap(), SolveTransition::Solved { first: true });

            // layer 1 is current, so the tile layer 0 covers looks already done from here
            assert_eq!(session.hint(0, 0), Some(TileHint::Zero));
            assert_eq!(session.hint_for_layer(0, 0, 0), Some(TileHint::Good));
            assert_eq!(session.hint_for_layer(0, 1, 0), Some(TileHint::Zero));
            assert_eq!(session.hint_for_layer(1, 1, 0), session.hint(1, 0));
            assert_eq!(session.hint_for_layer(1, 1, 0), Some(TileHint::Good));

            assert_eq!(session.hint_for_layer(2, 0, 0), None);
            assert_eq!(session.hint_for_layer(0, 2, 0), None);
        }

        #[test]
        fn settings_deserialize_through_new() {
            assert!(serde_json::from_str::<BmfSettings>(r#"{"n":0,"r":0,"mode":"Xor"}"#).is_err());
            assert!(serde_json::from_str::<BmfSettings>(r#"{"n":4,"r":7,"mode":"Or"}"#).is_err());

            let settings = BmfSettings::new(4, 2, Mode::Or).unwrap();
            let json = serde_json::to_string(&settings).unwrap();
            assert_eq!(json, r#"{"n":4,"r":2,"mode":"Or"}"#);
            assert_eq!(serde_json::from_str::<BmfSettings>(&json).unwrap(), settings);
        }

        #[test]
        fn editor_round_trip() {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            let mut session = BmfSession::new(BmfSettings::default(), &mut rng);
            session.toggle(Selector::Row, 0).unwrap();
            session.toggle(Selector::Column, 1).unwrap();

            let target = session.target().clone();
            let state = session.state().clone();
            let code = session.encode();

            session.enter_editor();
            assert!(session.is_editing());
            assert_eq!(session.player_matrix(), BitMatrix::zeros(5));

            assert_eq!(session.toggle(Selector::Row, 0).unwrap(), SolveTransition::Unchanged);
            assert_eq!(session.toggle(Selector::Column, 0).unwrap(), SolveTransition::Unchanged);
            assert_eq!(session.player_matrix().get(0, 0), Some(true));
            assert_eq!(session.encode(), encode(session.settings(), &session.player_matrix()));

            session.exit_editor();
            assert!(!session.is_editing());
            assert_eq!(*session.target(), target);
            assert_eq!(*session.state(), state);
            assert_eq!(session.encode(), code);
        }

        #[test]
        fn settings_changes() {
            let mut rng = ChaCha8Rng::seed_from_u64(5);
            let mut session = BmfSession::new(BmfSettings::default(), &mut rng);
            let or = BmfSettings::new(3, 2, Mode::Or).unwrap();

            session.set_settings(or, &mut rng);
            assert_eq!(session.target().side(), 3);
            assert_eq!(session.state().layers(), 2);
            session.regenerate(&mut rng);
            assert_eq!(*session.settings(), or);

            session.enter_editor();
            session.set_mode(Mode::Xor, &mut rng);
            assert_eq!(session.settings().mode(), Mode::Xor);
            session.set_settings(BmfSettings::new(4, 1, Mode::Xor).unwrap(), &mut rng);
            assert_eq!(session.state().side(), 4);
            assert_eq!(session.encode(), "4110000");

            session.exit_editor();
            assert_eq!(*session.settings(), or);
            assert_eq!(session.target().side(), 3);
        }

        #[test]
        fn editor_load_leaves_editor() {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            let mut session = BmfSession::new(BmfSettings::default(), &mut rng);
            session.enter_editor();
            session.load_code("210A").unwrap();

            assert!(!session.is_editing());
            assert_eq!(session.encode(), "210A");
        }

        #[test]
        fn snapshot_round_trip() {
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            let mut session = BmfSession::new(BmfSettings::new(4, 2, Mode::Or).unwrap(), &mut rng);
            session.toggle(Selector::Row, 3).unwrap();
            session.select_layer(1).unwrap();
            session.toggle(Selector::Column, 2).unwrap();

            let snapshot = session.snapshot();
            let json = serde_json::to_string(&snapshot).unwrap();
            let restored = BmfSession::restore(serde_json::from_str(&json).unwrap()).unwrap();

            assert_eq!(restored.snapshot(), snapshot);
            assert_eq!(restored.current_layer(), 1);
            assert_eq!(*restored.state(), *session.state());

            let mut broken = snapshot;
            broken.u.pop();
            assert!(matches!(BmfSession::restore(broken), Err(BmfError::SnapshotShape)));
        }

        proptest! {
            #[test]
            fn codec_round_trip(n in 2usize..=10, r in 1usize..=6, xor in any::<bool>(), bits in proptest::collection::vec(any::<bool>(), 100)) {
                let settings = BmfSettings::new(n, r, if xor { Mode::Xor } else { Mode::Or }).unwrap();
                let target = BitMatrix::from_row_major(n, bits[..n * n].to_vec()).unwrap();

                let code = encode(&settings, &target);
                prop_assert!(code.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
                prop_assert_eq!(decode(&code).unwrap(), (settings, target));
            }

            #[test]
            fn toggle_is_self_inverse(n in 2usize..=10, r in 1usize..=6, layer in 0usize..6, index in 0usize..10, column in any::<bool>()) {
                let settings = BmfSettings::new(n, r, Mode::Xor).unwrap();
                let mut state = PlayerState::new(&settings);
                state.select_layer(layer);
                let before = state.clone();
                let selector = if column { Selector::Column } else { Selector::Row };

                let applied = state.toggle(selector, index);
                prop_assert_eq!(applied, index < n);
                state.toggle(selector, index);
                prop_assert_eq!(state, before);
            }

            #[test]
            fn generated_targets_are_reachable(seed in any::<u64>(), n in 2usize..=10, r in 1usize..=6, xor in any::<bool>()) {
                let settings = BmfSettings::new(n, r, if xor { Mode::Xor } else { Mode::Or }).unwrap();
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let (target, witness) = generate_with_witness(&settings, &mut rng);

                prop_assert_eq!(witness.compose(settings.mode()), target);
            }
        }
    }

    mod masyu {
        use ndarray::Array2;
        use proptest::prelude::*;
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        use crate::location::Location;
        use crate::masyu::generator::{grown_loop, region_boundary, serpentine_loop};
        use crate::masyu::validator::{check_circle, check_loop};
        use crate::masyu::{
            derive_clues, generate_with_solution, validate, Builder, BuilderInvalidReason, Circle, Clues, EdgeSet,
            Geometry, LoopSolver, MasyuError, MasyuSession, MasyuSettings, Segment, Strategy, Uniqueness, Violation,
        };
        use crate::shape::{Axis, CellShape, SquareStep};
        use crate::SolveTransition;

        const SMALL_CLUES: [&str; 3] = [".W.", ".BW", "..."];

        fn small_loop() -> EdgeSet {
            EdgeSet::from_loop(3, &[
                Location(0, 0), Location(1, 0), Location(2, 0), Location(3, 0),
                Location(3, 1), Location(3, 2), Location(3, 3), Location(2, 3),
                Location(2, 2), Location(2, 1), Location(1, 1), Location(0, 1),
            ]).unwrap()
        }

        /// The boundary of the cells marked `#`.
        fn region(rows: &[&str]) -> EdgeSet {
            let n = rows.len();
            region_boundary(&Array2::from_shape_fn((n, n), |(y, x)| rows[y].as_bytes()[x] == b'#'))
        }

        #[test]
        fn small_puzzle_validates() {
            let clues = Clues::from_rows(&SMALL_CLUES).unwrap();
            let edges = small_loop();

            assert_eq!(edges.count(), 12);
            assert_eq!(validate(&edges, &clues), Ok(()));
            assert_eq!(format!("{}", edges.render(Some(&clues))), "+-+-+-+
|  W  |
+-+-+ +
   B|W|
+ + + +
    | |
+ + +-+
");
        }

        #[test]
        fn small_puzzle_needs_every_segment() {
            let clues = Clues::from_rows(&SMALL_CLUES).unwrap();
            let full = small_loop();

            for segment in full.segments() {
                let mut edges = full.clone();
                edges.toggle(segment).unwrap();
                assert!(matches!(validate(&edges, &clues), Err(Violation::DeadEnd(_))));
            }
        }

        #[test]
        fn clues_read_off_loop() {
            assert_eq!(derive_clues(&small_loop()), Clues::from_rows(&SMALL_CLUES).unwrap());
        }

        #[test]
        fn solver_finds_small_loop() {
            let clues = Clues::from_rows(&SMALL_CLUES).unwrap();
            let (found, complete) = LoopSolver::new(&clues).solutions(usize::MAX, 10_000);

            assert!(complete);
            assert!(found.contains(&small_loop()));
            assert!(found.iter().all(|edges| validate(edges, &clues).is_ok()));
        }

        #[test]
        fn corner_sample_is_unsolvable() {
            let clues = Clues::from_rows(&["BWB", "W.W", "BWB"]).unwrap();
            assert_eq!(LoopSolver::new(&clues).grade(500), Uniqueness::Unsolvable);
        }

        #[test]
        fn empty_board_has_many_loops() {
            let grade = LoopSolver::new(&Clues::empty(2)).grade(500);
            assert_eq!(grade, Uniqueness::Multiple);
            assert_eq!(grade.grade_name(), "multiple");
        }

        #[test]
        fn violation_order() {
            let clues = Clues::from_rows(&["...", ".B.", "..."]).unwrap();
            let mut edges = EdgeSet::empty(3);
            assert_eq!(validate(&edges, &clues), Err(Violation::Empty));

            edges.toggle(Segment::Horizontal(Location(0, 0))).unwrap();
            assert_eq!(validate(&edges, &clues), Err(Violation::DeadEnd(Location(0, 0))));

            let corner = EdgeSet::from_loop(3, &[Location(0, 0), Location(1, 0), Location(1, 1), Location(0, 1)]).unwrap();
            assert_eq!(validate(&corner, &clues), Err(Violation::OffLoop(Location(1, 1))));
            assert_eq!(validate(&corner, &Clues::empty(3)), Ok(()));

            let mut two = corner.clone();
            for segment in EdgeSet::from_loop(3, &[Location(2, 2), Location(3, 2), Location(3, 3), Location(2, 3)]).unwrap().segments() {
                two.toggle(segment).unwrap();
            }
            assert_eq!(validate(&two, &Clues::empty(3)), Err(Violation::Disconnected { reached: 4, total: 8 }));
            // checking is a pure function of its inputs
            assert_eq!(validate(&two, &Clues::empty(3)), validate(&two, &Clues::empty(3)));
        }

        #[test]
        fn serpentine_baseline() {
            assert_eq!(serpentine_loop(3), small_loop());
            assert_eq!(derive_clues(&serpentine_loop(3)), Clues::from_rows(&SMALL_CLUES).unwrap());

            for n in 3..=10 {
                let edges = serpentine_loop(n);
                let clues = derive_clues(&edges);
                assert_eq!(check_loop(&edges), Ok(()));
                assert!(clues.count() > 0, "no clues on side {n}");
                assert_eq!(validate(&edges, &clues), Ok(()));
            }

            assert_eq!(serpentine_loop(4), region(&["####", "...#", "...#", "####"]));
            assert_eq!(derive_clues(&serpentine_loop(10)).count(), 18);
        }

        #[test]
        fn serpentine_strategy_reports_its_grade() {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            let settings = MasyuSettings { strategy: Strategy::Serpentine, ..MasyuSettings::new(3).unwrap() };
            let generated = generate_with_solution(&settings, &mut rng).unwrap();

            assert_eq!(generated.solution, small_loop());
            assert_eq!(generated.uniqueness, Uniqueness::Unique(small_loop()));
        }

        #[test]
        fn default_generation_is_unique() {
            for n in 4..=6 {
                let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
                let generated = generate_with_solution(&MasyuSettings::new(n).unwrap(), &mut rng).unwrap();

                assert_eq!(generated.uniqueness, Uniqueness::Unique(generated.solution.clone()));
                assert_eq!(validate(&generated.solution, &generated.clues), Ok(()));
            }
        }

        #[test]
        fn generation_gives_up_after_its_budget() {
            let mut rng = ChaCha8Rng::seed_from_u64(3);
            // one model per grade can never prove a board unique
            let settings = MasyuSettings { attempts_per_side: 1, solution_cap: 1, ..MasyuSettings::new(3).unwrap() };

            assert_eq!(settings.attempt_budget(), 3);
            assert_eq!(
                generate_with_solution(&settings, &mut rng).unwrap_err(),
                MasyuError::NoUniquePuzzle { attempts: 3 },
            );
        }

        #[test]
        fn white_circle_rejections() {
            let corner = region(&["###", "#..", "#.."]);
            assert_eq!(check_circle(&corner, Location(0, 0), Circle::White), Err(Violation::WhiteNotStraight(Location(0, 0))));

            // the turns of a lone column are beside it, not along its line
            let column = region(&[".#.", ".#.", ".#."]);
            assert_eq!(column.cell_shape(Location(1, 1)), Some(CellShape::Straight(Axis::Horizontal)));
            assert_eq!(check_circle(&column, Location(1, 1), Circle::White), Err(Violation::WhiteWithoutTurn(Location(1, 1))));

            // the cell above is off the board and the one below is not on the loop
            let row = region(&["###", "...", "..."]);
            assert_eq!(row.cell_shape(Location(1, 0)), Some(CellShape::Straight(Axis::Vertical)));
            assert_eq!(check_circle(&row, Location(1, 0), Circle::White), Err(Violation::WhiteWithoutTurn(Location(1, 0))));
            assert_eq!(
                validate(&row, &Clues::from_rows(&[".W.", "...", "..."]).unwrap()),
                Err(Violation::WhiteWithoutTurn(Location(1, 0))),
            );
        }

        #[test]
        fn black_circle_rejections() {
            let row = region(&["###", "...", "..."]);
            assert_eq!(check_circle(&row, Location(1, 0), Circle::Black), Err(Violation::BlackNotTurn(Location(1, 0))));

            let corner = region(&["###", "#..", "#.."]);
            assert_eq!(corner.cell_shape(Location(0, 0)), Some(CellShape::Turn(SquareStep::Up, SquareStep::Left)));
            assert_eq!(
                check_circle(&corner, Location(0, 0), Circle::Black),
                Err(Violation::BlackArmBent { cell: Location(0, 0), arm: SquareStep::Up }),
            );

            let hook = region(&["#..", "##.", "##."]);
            assert_eq!(check_loop(&hook), Ok(()));
            assert_eq!(hook.cell_shape(Location(1, 0)), Some(CellShape::Turn(SquareStep::Down, SquareStep::Left)));
            assert_eq!(hook.cell_shape(Location(1, 1)), Some(CellShape::Turn(SquareStep::Up, SquareStep::Right)));
            assert_eq!(
                check_circle(&hook, Location(1, 0), Circle::Black),
                Err(Violation::BlackArmBent { cell: Location(1, 0), arm: SquareStep::Down }),
            );
        }

        #[test]
        fn black_circles_in_every_orientation() {
            for (rows, vertical, horizontal) in [
                (["###", "#..", "#.."], SquareStep::Up, SquareStep::Left),
                (["###", "..#", "..#"], SquareStep::Up, SquareStep::Right),
                (["#..", "#..", "###"], SquareStep::Down, SquareStep::Left),
                (["..#", "..#", "###"], SquareStep::Down, SquareStep::Right),
            ] {
                let edges = region(&rows);
                let center = Location(1, 1);
                assert_eq!(edges.cell_shape(center), Some(CellShape::Turn(vertical, horizontal)));
                assert_eq!(check_circle(&edges, center, Circle::Black), Ok(()));
                assert_eq!(check_circle(&edges, center, Circle::White), Err(Violation::WhiteNotStraight(center)));
                assert_eq!(derive_clues(&edges).get(center), Some(Circle::Black));
            }
        }

        #[test]
        fn from_loop_rejects_jumps() {
            assert_eq!(
                EdgeSet::from_loop(3, &[Location(0, 0), Location(2, 0), Location(2, 1)]),
                Err(MasyuError::NotAdjacent(Location(0, 0), Location(2, 0))),
            );
        }

        #[test]
        fn hit_testing() {
            let edges = EdgeSet::empty(3);
            let geometry = Geometry::default();

            assert_eq!(edges.segment_at(60.0, 20.0, &geometry), Some(Segment::Horizontal(Location(0, 0))));
            assert_eq!(edges.segment_at(20.0, 60.0, &geometry), Some(Segment::Vertical(Location(0, 0))));
            assert_eq!(edges.segment_at(60.0, 60.0, &geometry), None);
            assert_eq!(edges.segment_at(260.0, 140.0, &geometry), Some(Segment::Vertical(Location(3, 1))));
        }

        #[test]
        fn session_solves_small_puzzle() {
            let clues = Clues::from_rows(&SMALL_CLUES).unwrap();
            let mut session = MasyuSession::new(clues);
            let segments = small_loop().segments().collect::<Vec<_>>();
            let (last, rest) = segments.split_last().unwrap();

            for segment in rest {
                assert_eq!(session.toggle(*segment).unwrap(), SolveTransition::Unchanged);
            }
            assert_eq!(session.toggle(*last).unwrap(), SolveTransition::Solved { first: true });
            assert_eq!(format!("{}", session), format!("{}", small_loop().render(Some(session.clues()))));

            assert_eq!(session.toggle(*last).unwrap(), SolveTransition::Unsolved);
            assert_eq!(session.toggle(*last).unwrap(), SolveTransition::Solved { first: false });

            assert_eq!(session.reset(), SolveTransition::Unsolved);
            assert!(session.was_solved());
            assert_eq!(session.edges().count(), 0);
        }

        #[test]
        fn session_rejects_outside_segments() {
            let mut session = MasyuSession::new(Clues::empty(3));
            let outside = Segment::Horizontal(Location(3, 0));

            assert_eq!(session.toggle(outside), Err(MasyuError::SegmentOutOfBounds(outside)));
            assert_eq!(session.toggle_at(500.0, 500.0, &Geometry::default()), None);
            assert_eq!(session.toggle_at(60.0, 20.0, &Geometry::default()), Some(SolveTransition::Unchanged));
            assert!(session.edges().contains(Segment::Horizontal(Location(0, 0))));
        }

        #[test]
        fn builder() {
            let clues = Builder::with_side(3)
                .add_rows(&SMALL_CLUES)
                .build()
                .unwrap();
            assert_eq!(clues, Clues::from_rows(&SMALL_CLUES).unwrap());
            assert_eq!(format!("{}", clues), ".W.
.BW
...
");

            let mut builder = Builder::with_side(3);
            builder.add_circle(Location(1, 1), Circle::White).remove_circle(Location(1, 1));
            assert_eq!(builder.build().unwrap(), Clues::empty(3));

            assert_eq!(Builder::with_side(1).is_valid(), Some(&vec![BuilderInvalidReason::SideOutOfRange]));
            assert_eq!(Builder::with_side(2).is_valid(), Some(&vec![BuilderInvalidReason::SideOutOfRange]));
            assert_eq!(
                Builder::with_side(3).add_circle(Location(3, 0), Circle::Black).build(),
                Err(&vec![BuilderInvalidReason::FeatureOutOfBounds]),
            );
        }

        #[test]
        fn settings_reject_bad_sides() {
            assert_eq!(MasyuSettings::new(1), Err(MasyuError::SideOutOfRange(1)));
            assert_eq!(MasyuSettings::new(2), Err(MasyuError::SideOutOfRange(2)));
            assert_eq!(MasyuSettings::new(11), Err(MasyuError::SideOutOfRange(11)));
            assert_eq!(MasyuSettings::new(4).unwrap().n, 4);
            assert_eq!(MasyuSettings::new(10).unwrap().attempt_budget(), 300);
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn grown_loops_validate(seed in any::<u64>(), n in 3usize..=8) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let edges = grown_loop(n, &mut rng);

                prop_assert_eq!(check_loop(&edges), Ok(()));
                prop_assert_eq!(validate(&edges, &derive_clues(&edges)), Ok(()));
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(8))]

            #[test]
            fn generated_puzzles_are_unique(seed in any::<u64>(), n in 3usize..=4) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let generated = generate_with_solution(&MasyuSettings::new(n).unwrap(), &mut rng).unwrap();

                prop_assert_eq!(validate(&generated.solution, &generated.clues), Ok(()));
                prop_assert_eq!(&generated.uniqueness, &Uniqueness::Unique(generated.solution.clone()));
            }
        }
    }
}

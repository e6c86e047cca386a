use super::*;

fn driver(name: &str, team: &str) -> Driver {
    Driver {
        name: name.to_string(),
        code: String::new(),
        team: team.to_string(),
        points: 0.0,
        wins: 0,
        podiums: 0,
        fastest_laps: 0,
        previous_rank: None,
        consistency_index: None,
    }
}

fn result(driver: &str, position: Option<u32>, points: f64, fastest_lap: bool) -> SessionResult {
    SessionResult {
        driver: driver.to_string(),
        position,
        points,
        fastest_lap,
    }
}

fn session(name: &str, date: &str, results: Vec<SessionResult>) -> Session {
    let mut session = Session::new(name, date);
    session.results = results;
    session.sort_results();
    session
}

fn season() -> (Vec<Driver>, Vec<Session>) {
    let drivers = vec![driver("A", "Ferrari"), driver("B", "Haas"), driver("C", "Ferrari")];
    // Listed out of date order on purpose.
    let sessions = vec![
        session(
            "Third",
            "2024-03-01",
            vec![
                result("A", Some(3), 15.0, false),
                result("C", Some(1), 25.0, true),
                result("B", None, 0.0, false),
            ],
        ),
        session(
            "Opener",
            "2024-01-01",
            vec![
                result("A", Some(1), 25.0, true),
                result("B", Some(2), 18.0, false),
            ],
        ),
        session(
            "Second",
            "2024-02-01",
            vec![
                result("B", Some(1), 25.0, false),
                result("A", None, 0.0, false),
                result("C", Some(2), 18.0, false),
            ],
        ),
    ];
    (drivers, sessions)
}

#[test]
fn opener_scenario_produces_expected_points_and_gaps() {
    let sessions = vec![session(
        "Opener",
        "2024-01-01",
        vec![
            result("A", Some(1), 25.0, true),
            result("B", Some(2), 18.0, false),
        ],
    )];

    let metrics = build_season_metrics(&[], &sessions, Some(1));

    let a = metrics.driver("A").expect("A in roster");
    let b = metrics.driver("B").expect("B in roster");
    assert_eq!(a.cumulative_points, vec![25.0]);
    assert_eq!(b.cumulative_points, vec![18.0]);
    assert_eq!(a.gap_to_leader, vec![0.0]);
    assert_eq!(b.gap_to_leader, vec![7.0]);
    assert_eq!(a.fastest_lap_count, 1);
    assert_eq!(a.fastest_lap_positions, vec![Some(1)]);
    assert_eq!(a.team, INDEPENDENT_TEAM);
}

#[test]
fn rounds_are_sorted_chronologically_with_indices() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let names: Vec<&str> = metrics.rounds.iter().map(|round| round.name.as_str()).collect();
    assert_eq!(names, vec!["Opener", "Second", "Third"]);
    let indices: Vec<usize> = metrics.rounds.iter().map(|round| round.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn undated_sessions_follow_dated_ones_in_input_order() {
    let sessions = vec![
        session("Mystery", "", vec![result("A", Some(1), 25.0, false)]),
        session("Bad date", "soon", vec![result("A", Some(2), 18.0, false)]),
        session("Dated", "2024-05-01", vec![result("A", Some(3), 15.0, false)]),
    ];

    let metrics = build_season_metrics(&[], &sessions, None);

    let names: Vec<&str> = metrics.rounds.iter().map(|round| round.name.as_str()).collect();
    assert_eq!(names, vec!["Dated", "Mystery", "Bad date"]);
}

#[test]
fn rollups_cover_positions_podiums_and_averages() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let a = metrics.driver("A").expect("A in roster");
    assert_eq!(a.positions, vec![Some(1), None, Some(3)]);
    assert_eq!(a.points_earned, vec![25.0, 0.0, 15.0]);
    assert_eq!(a.cumulative_points, vec![25.0, 25.0, 40.0]);
    assert_eq!(a.total_points, 40.0);
    assert_eq!(a.wins, 1);
    assert_eq!(a.podiums, 2);
    assert_eq!(a.race_count, 2);
    assert_eq!(a.avg_finish, Some(2.0));
    assert_eq!(a.best_finish, Some(1));
    assert_eq!(a.team, "Ferrari");

    let c = metrics.driver("C").expect("C in roster");
    assert_eq!(c.positions, vec![None, Some(2), Some(1)]);
    assert_eq!(c.cumulative_points, vec![0.0, 18.0, 43.0]);

    assert_eq!(metrics.max_position, 3);
}

#[test]
fn gap_to_leader_is_relative_to_round_maximum() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let b = metrics.driver("B").expect("B in roster");
    assert_eq!(b.cumulative_points, vec![18.0, 43.0, 43.0]);
    assert_eq!(b.gap_to_leader, vec![7.0, 0.0, 0.0]);

    for round in 0..metrics.round_count() {
        assert!(metrics.drivers.iter().all(|stats| stats.gap_to_leader[round] >= 0.0));
        assert!(metrics.drivers.iter().any(|stats| stats.gap_to_leader[round] == 0.0));
    }
}

#[test]
fn driver_lookup_is_case_and_whitespace_stable() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    assert!(metrics.driver(" a ").is_some());
    assert!(metrics.driver("Nobody").is_none());
}

#[test]
fn roster_comes_from_results_not_driver_list() {
    let (mut drivers, sessions) = season();
    drivers.push(driver("Reserve", "Williams"));

    let metrics = build_season_metrics(&drivers, &sessions, None);

    let names: Vec<&str> = metrics.drivers.iter().map(|stats| stats.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn window_matches_rebuild_with_truncated_sessions() {
    let (drivers, sessions) = season();

    let windowed = build_season_metrics(&drivers, &sessions, Some(2));
    let truncated: Vec<Session> = sessions
        .iter()
        .filter(|session| session.name != "Third")
        .cloned()
        .collect();
    let rebuilt = build_season_metrics(&drivers, &truncated, None);

    assert_eq!(windowed, rebuilt);
    assert_eq!(windowed.round_count(), 2);
    let a = windowed.driver("A").expect("A in roster");
    assert_eq!(a.positions.len(), 2);
    assert_eq!(a.total_points, 25.0);
}

#[test]
fn oversized_window_uses_every_round() {
    let (drivers, sessions) = season();

    let full = build_season_metrics(&drivers, &sessions, None);
    let oversized = build_season_metrics(&drivers, &sessions, Some(99));

    assert_eq!(full, oversized);
}

#[test]
fn rebuilding_is_idempotent() {
    let (drivers, sessions) = season();

    let first = build_season_metrics(&drivers, &sessions, None);
    let second = build_season_metrics(&drivers, &sessions, None);

    assert_eq!(first, second);
}

#[test]
fn empty_input_degrades_to_empty_metrics() {
    let metrics = build_season_metrics(&[], &[], None);

    assert!(metrics.rounds.is_empty());
    assert!(metrics.drivers.is_empty());
    assert!(metrics.teams.is_empty());
    assert_eq!(metrics.max_position, DEFAULT_MAX_POSITION);

    let empty_results = vec![session("Opener", "2024-01-01", Vec::new())];
    let metrics = build_season_metrics(&[], &empty_results, None);
    assert_eq!(metrics.round_count(), 1);
    assert!(metrics.drivers.is_empty());
}

#[test]
fn repeated_result_in_one_round_counts_once() {
    let sessions = vec![session(
        "Opener",
        "2024-01-01",
        vec![
            result("A", Some(1), 25.0, false),
            result("a", Some(4), 12.0, false),
        ],
    )];

    let metrics = build_season_metrics(&[], &sessions, None);

    assert_eq!(metrics.drivers.len(), 1);
    let a = &metrics.drivers[0];
    assert_eq!(a.positions, vec![Some(1)]);
    assert_eq!(a.total_points, 25.0);
    assert_eq!(a.wins, 1);
}

#[test]
fn team_points_sum_driver_points_per_round() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let names: Vec<&str> = metrics.teams.iter().map(|team| team.name.as_str()).collect();
    assert_eq!(names, vec!["Ferrari", "Haas"]);

    let ferrari = &metrics.teams[0];
    assert_eq!(ferrari.points_earned, vec![25.0, 18.0, 40.0]);
    assert_eq!(ferrari.cumulative_points, vec![25.0, 43.0, 83.0]);
    assert_eq!(ferrari.total_points, 83.0);
}

#[test]
fn head_to_head_counts_classified_over_unclassified() {
    let summary = head_to_head(&[Some(1), None, Some(3)], &[Some(2), Some(1), None], 3);

    assert_eq!(summary.wins_a, 2);
    assert_eq!(summary.wins_b, 1);
    assert_eq!(summary.ties, 0);
    assert_eq!(summary.rounds_compared, 3);
    assert_eq!(
        summary.best_finish,
        Some(BestFinish {
            side: Side::A,
            position: 1
        })
    );
    // Unclassified rounds count as P4: (1 - 3 + 1) / 3.
    assert_eq!(summary.average_gap, Some(-1.0 / 3.0));
}

#[test]
fn head_to_head_gap_uses_field_size_for_unclassified_rounds() {
    let summary = head_to_head_in_field(&[Some(2), None], &[Some(5), Some(3)], 2, 20);

    assert_eq!(summary.rounds_compared, 2);
    // (5 - 2) + (3 - 21)
    assert_eq!(summary.average_gap, Some(-7.5));

    let only_b = head_to_head_in_field(&[None], &[Some(1)], 1, 9);
    assert_eq!(only_b.average_gap, Some(-9.0));
}

#[test]
fn head_to_head_sentinel_outranks_any_field_size() {
    let summary = head_to_head(&[Some(1500)], &[None], 1);

    assert_eq!(summary.wins_a, 1);
    assert_eq!(summary.wins_b, 0);
    assert!(Finish::Classified(u32::MAX) < Finish::Unclassified);
}

#[test]
fn head_to_head_skips_rounds_without_classified_finish() {
    let summary = head_to_head(&[None, Some(2)], &[None, Some(5)], 2);

    assert_eq!(summary.rounds_compared, 1);
    assert_eq!(summary.wins_a, 1);
    assert_eq!(summary.average_gap, Some(3.0));

    let empty = head_to_head(&[None], &[None], 1);
    assert_eq!(empty, HeadToHeadSummary::default());
}

#[test]
fn head_to_head_respects_round_window() {
    let summary = head_to_head(&[Some(1), Some(9)], &[Some(2), Some(1)], 1);

    assert_eq!(summary.wins_a, 1);
    assert_eq!(summary.wins_b, 0);
}

#[test]
fn named_head_to_head_fails_closed() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    assert!(metrics.head_to_head("A", "a", 3).is_none());
    assert!(metrics.head_to_head("A", "Nobody", 3).is_none());

    let named = metrics.head_to_head("A", "B", 10).expect("both in roster");
    assert_eq!(named.rounds, 3);
    assert_eq!(named.summary.wins_a, 2);
    assert_eq!(named.summary.wins_b, 1);
    assert_eq!(named.best_finish_driver(), Some("A"));
    assert_eq!(named.summary.average_gap, Some(-1.0 / 3.0));
}

#[test]
fn podium_breakdown_buckets_positions_in_window() {
    let sessions = vec![
        session("R1", "2024-01-01", vec![result("A", Some(1), 25.0, false)]),
        session("R2", "2024-02-01", vec![result("A", Some(7), 6.0, false)]),
        session("R3", "2024-03-01", vec![result("A", Some(14), 0.0, false)]),
    ];
    let metrics = build_season_metrics(&[], &sessions, None);

    let all = podium_breakdown(&metrics, 3);
    assert_eq!(
        all[0],
        PodiumBreakdown {
            driver: "A".to_string(),
            wins: 1,
            second: 0,
            third: 0,
            top_ten: 1,
            rest: 1,
        }
    );

    let first_round = podium_breakdown(&metrics, 1);
    assert_eq!(first_round[0].wins, 1);
    assert_eq!(first_round[0].top_ten, 0);
}

#[test]
fn fastest_lap_form_orders_by_average_finish() {
    let sessions = vec![
        session(
            "R1",
            "2024-01-01",
            vec![
                result("A", Some(4), 12.0, true),
                result("B", None, 0.0, true),
            ],
        ),
        session(
            "R2",
            "2024-02-01",
            vec![
                result("C", Some(1), 25.0, true),
                result("A", Some(2), 18.0, true),
            ],
        ),
    ];
    let metrics = build_season_metrics(&[], &sessions, None);

    let form = fastest_lap_form(&metrics);
    let order: Vec<&str> = form.iter().map(|entry| entry.driver.as_str()).collect();
    assert_eq!(order, vec!["C", "A", "B"]);
    assert_eq!(form[1].avg_finish, Some(3.0));
    assert_eq!(form[2].avg_finish, None);

    let highlights = fastest_lap_highlights(&form);
    assert_eq!(highlights.standout.map(|entry| entry.driver), Some("C".to_string()));
    assert_eq!(
        highlights.most_fastest_laps.map(|entry| entry.driver),
        Some("A".to_string())
    );
    assert!(highlights.best_average.is_none());
}

#[test]
fn heatmap_order_supports_each_sort() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let names = |sort| -> Vec<String> {
        heatmap_order(&metrics, sort)
            .into_iter()
            .map(|stats| stats.name.clone())
            .collect()
    };

    assert_eq!(names(HeatmapSort::Points), vec!["B", "C", "A"]);
    assert_eq!(names(HeatmapSort::Name), vec!["A", "B", "C"]);
    assert_eq!(names(HeatmapSort::Average), vec!["B", "C", "A"]);
}

#[test]
fn points_per_race_counts_classified_finishes_only() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    assert_eq!(metrics.driver("A").expect("A").points_per_race, Some(20.0));
    assert_eq!(metrics.driver("C").expect("C").points_per_race, Some(21.5));

    let sessions = vec![session(
        "R1",
        "2024-01-01",
        vec![result("D", None, 0.0, false)],
    )];
    let unclassified = build_season_metrics(&[], &sessions, None);
    assert_eq!(unclassified.drivers[0].points_per_race, None);
}

#[test]
fn driver_form_lists_latest_rounds_first() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let form = driver_form(&metrics, 2);

    let names: Vec<&str> = form.iter().map(|entry| entry.driver.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);

    let b = &form[0];
    let rounds: Vec<&str> = b.recent.iter().map(|entry| entry.round.as_str()).collect();
    assert_eq!(rounds, vec!["Third", "Second"]);
    assert_eq!(b.recent[0].result.as_ref().map(|result| result.position), Some(None));
    assert_eq!(b.recent_average, Some(25.0));
    assert_eq!(b.season_average, Some(21.5));
    assert_eq!(b.best_finish, Some(1));

    let a = &form[2];
    assert_eq!(a.recent_average, Some(15.0));
    assert_eq!(a.season_average, Some(20.0));
}

#[test]
fn driver_form_marks_absent_rounds() {
    let (drivers, sessions) = season();
    let metrics = build_season_metrics(&drivers, &sessions, None);

    let form = driver_form(&metrics, 5);
    let c = form.iter().find(|entry| entry.driver == "C").expect("C raced");

    assert_eq!(c.recent.len(), 3);
    assert_eq!(c.recent[2].round, "Opener");
    assert!(c.recent[2].result.is_none());
    assert_eq!(c.recent_average, Some(21.5));

    assert!(driver_form(&metrics, 0).iter().all(|entry| entry.recent.is_empty()));
}

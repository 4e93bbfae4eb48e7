//! End-to-end scenarios against hand-built in-memory timetables, one per
//! named scenario. No network or file I/O: every timetable here is a
//! `FeedLoader` literal.

use raptor_core::config::SearchOptions;
use raptor_core::error::QueryError;
use raptor_core::model::{FeedLoader, FeedStop, FeedStopTime, FeedTransfer, FeedTrip};
use raptor_core::query::{LatLon, search};
use raptor_core::transit_model::TransitModel;

struct Timetable {
    stops: Vec<FeedStop>,
    trips: Vec<FeedTrip>,
    transfers: Vec<FeedTransfer>,
}

impl FeedLoader for Timetable {
    fn stops(&self) -> Vec<FeedStop> {
        self.stops.clone()
    }
    fn trips(&self) -> Vec<FeedTrip> {
        self.trips.clone()
    }
    fn transfers(&self) -> Vec<FeedTransfer> {
        self.transfers.clone()
    }
}

fn stop(id: &str, lat: f64, lon: f64) -> FeedStop {
    FeedStop { stop_id: id.to_string(), lat, lon }
}

fn stop_time(id: &str, arrival: u32, departure: u32) -> FeedStopTime {
    FeedStopTime { stop_id: id.to_string(), arrival, departure }
}

fn trip(trip_id: &str, route_key: &str, stop_times: Vec<FeedStopTime>) -> FeedTrip {
    FeedTrip { trip_id: trip_id.to_string(), route_key: route_key.to_string(), stop_times }
}

fn at(id: &str, lat: f64, lon: f64) -> LatLon {
    let _ = (id,);
    LatLon { lat, lon }
}

/// S1: a direct ride with no transfers.
#[test]
fn s1_direct_ride() {
    let timetable = Timetable {
        stops: vec![stop("X", 0.0, 0.0), stop("Y", 0.0, 0.01)],
        trips: vec![trip(
            "T1",
            "R1",
            vec![stop_time("X", 600, 600), stop_time("Y", 900, 900)],
        )],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let result = search(
        &model,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.01),
        500,
        SearchOptions::default(),
    )
    .unwrap();

    assert_eq!(result.journeys.len(), 1);
    let journey = &result.journeys[0];
    assert_eq!(journey.arrival_time, 900);
    assert_eq!(journey.transfer_count, 0);
    assert_eq!(journey.legs.len(), 1);
}

/// S2: one transfer between two routes meeting at a shared stop.
#[test]
fn s2_one_transfer() {
    let timetable = Timetable {
        stops: vec![stop("X", 0.0, 0.0), stop("M", 0.0, 0.01), stop("Y", 0.0, 0.02)],
        trips: vec![
            trip("T1", "R1", vec![stop_time("X", 600, 600), stop_time("M", 900, 900)]),
            trip("T2", "R2", vec![stop_time("M", 900, 900), stop_time("Y", 1200, 1200)]),
        ],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let result = search(
        &model,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.02),
        500,
        SearchOptions::default(),
    )
    .unwrap();

    let journey = result
        .journeys
        .iter()
        .find(|j| j.arrival_time == 1200)
        .expect("expected a journey arriving at 1200");
    assert_eq!(journey.transfer_count, 1);
}

/// S3: a foot-path transfer between two nearby-but-distinct stops.
#[test]
fn s3_footpath_transfer() {
    let timetable = Timetable {
        stops: vec![
            stop("X", 0.0, 0.0),
            stop("M1", 0.0, 0.01),
            stop("M2", 0.0, 0.010001),
            stop("Y", 0.0, 0.02),
        ],
        trips: vec![
            trip("T1", "R1", vec![stop_time("X", 600, 600), stop_time("M1", 900, 900)]),
            trip("T2", "R2", vec![stop_time("M2", 1000, 1000), stop_time("Y", 1300, 1300)]),
        ],
        transfers: vec![FeedTransfer {
            from_stop: "M1".to_string(),
            to_stop: "M2".to_string(),
            duration: 60,
        }],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let result = search(
        &model,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.02),
        500,
        SearchOptions::default(),
    )
    .unwrap();

    let journey = result
        .journeys
        .iter()
        .find(|j| j.arrival_time == 1300)
        .expect("expected a journey arriving at 1300");
    assert_eq!(journey.legs.len(), 3);
    assert!(matches!(journey.legs[1], raptor_core::journey::JourneyLeg::Walk { .. }));
}

/// S4: a loop route visiting the same stop twice; boarding at the later
/// occurrence never beats boarding at the first under this schedule.
#[test]
fn s4_loop_route() {
    let timetable = Timetable {
        stops: vec![stop("A", 0.0, 0.0), stop("B", 0.0, 0.01), stop("C", 0.0, 0.02)],
        trips: vec![trip(
            "T1",
            "R1",
            vec![
                stop_time("A", 0, 0),
                stop_time("B", 100, 100),
                stop_time("A", 200, 200),
                stop_time("C", 300, 300),
            ],
        )],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let result = search(
        &model,
        at("A", 0.0, 0.0),
        at("C", 0.0, 0.02),
        0,
        SearchOptions::default(),
    )
    .unwrap();

    let journey = &result.journeys[0];
    assert_eq!(journey.arrival_time, 300);
    assert_eq!(journey.transfer_count, 0);
}

/// S5: two non-dominated journeys survive; a third, dominated one does not.
#[test]
fn s5_pareto_frontier() {
    let timetable = Timetable {
        stops: vec![
            stop("X", 0.0, 0.0),
            stop("M1", 0.0, 0.01),
            stop("M2", 0.0, 0.02),
            stop("Y", 0.0, 0.03),
        ],
        trips: vec![
            // 0 transfers, slower: X -> Y direct, arrives 1100.
            trip("TD", "RD", vec![stop_time("X", 500, 500), stop_time("Y", 1100, 1100)]),
            // 1 transfer via M1: arrives 1200 (dominated by both alternatives below).
            trip("TA1", "RA1", vec![stop_time("X", 500, 500), stop_time("M1", 700, 700)]),
            trip("TA2", "RA2", vec![stop_time("M1", 700, 700), stop_time("Y", 1200, 1200)]),
            // 2 transfers, fast: via M1 then M2, arrives 1000.
            trip("TB2", "RB2", vec![stop_time("M1", 700, 750), stop_time("M2", 850, 850)]),
            trip("TB3", "RB3", vec![stop_time("M2", 850, 850), stop_time("Y", 1000, 1000)]),
        ],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let result = search(
        &model,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.03),
        400,
        SearchOptions::default(),
    )
    .unwrap();

    assert!(result.journeys.iter().any(|j| j.arrival_time == 1000 && j.transfer_count == 2));
    assert!(result.journeys.iter().any(|j| j.arrival_time == 1100 && j.transfer_count == 0));
    assert!(!result.journeys.iter().any(|j| j.arrival_time == 1200));
}

/// S6: an origin far from every stop yields `NoAccessStops`.
#[test]
fn s6_no_access_stops() {
    let timetable = Timetable {
        stops: vec![stop("X", 0.0, 0.0), stop("Y", 0.0, 0.01)],
        trips: vec![trip("T1", "R1", vec![stop_time("X", 600, 600), stop_time("Y", 900, 900)])],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();

    let err = search(
        &model,
        at("far", 45.0, 45.0),
        at("Y", 0.0, 0.01),
        500,
        SearchOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, QueryError::NoAccessStops);
}

/// S7: trips sharing an upstream route key but disagreeing on stop sequence
/// end up in distinct synthetic routes, each independently searchable.
#[test]
fn s7_route_regrouping_splits_disagreeing_sequences() {
    let timetable = Timetable {
        stops: vec![
            stop("X", 0.0, 0.0),
            stop("Y", 0.0, 0.01),
            stop("Z", 0.0, 0.02),
        ],
        trips: vec![
            trip("T1", "R1", vec![stop_time("X", 600, 600), stop_time("Y", 900, 900)]),
            // Same upstream route key, different stop sequence: must not be
            // merged with T1's synthetic route.
            trip("T2", "R1", vec![stop_time("X", 700, 700), stop_time("Z", 1000, 1000)]),
        ],
        transfers: vec![],
    };
    let model = TransitModel::build(&timetable).unwrap();
    assert_eq!(model.store().route_count(), 2);

    let to_y = search(
        &model,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.01),
        500,
        SearchOptions::default(),
    )
    .unwrap();
    assert_eq!(to_y.journeys[0].arrival_time, 900);

    let to_z = search(
        &model,
        at("X", 0.0, 0.0),
        at("Z", 0.0, 0.02),
        500,
        SearchOptions::default(),
    )
    .unwrap();
    assert_eq!(to_z.journeys[0].arrival_time, 1000);
}

/// Adding a shorter foot-path never makes any stop's best arrival worse.
#[test]
fn monotonicity_shorter_footpath_never_worsens_arrival() {
    let stops = vec![
        stop("X", 0.0, 0.0),
        stop("M1", 0.0, 0.01),
        // Far from every other stop so the spatial index does not also
        // connect it automatically; the only path in is the explicit
        // transfer below, isolating the effect of its duration.
        stop("M2", 1.0, 1.0),
        stop("Y", 0.0, 0.02),
    ];
    let trips = vec![
        trip("T1", "R1", vec![stop_time("X", 600, 600), stop_time("M1", 900, 900)]),
        // Two trips on the second route: a slow walker misses the earlier
        // one and has to wait for the later one.
        trip("T2a", "R2", vec![stop_time("M2", 1000, 1000), stop_time("Y", 1300, 1300)]),
        trip("T2b", "R2", vec![stop_time("M2", 1300, 1300), stop_time("Y", 1600, 1600)]),
    ];

    let base = Timetable {
        stops: stops.clone(),
        trips: trips.clone(),
        transfers: vec![FeedTransfer {
            from_stop: "M1".to_string(),
            to_stop: "M2".to_string(),
            duration: 300,
        }],
    };
    let faster = Timetable {
        stops,
        trips,
        transfers: vec![FeedTransfer {
            from_stop: "M1".to_string(),
            to_stop: "M2".to_string(),
            duration: 60,
        }],
    };

    let model_base = TransitModel::build(&base).unwrap();
    let model_faster = TransitModel::build(&faster).unwrap();

    let result_base = search(
        &model_base,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.02),
        500,
        SearchOptions::default(),
    )
    .unwrap();
    let result_faster = search(
        &model_faster,
        at("X", 0.0, 0.0),
        at("Y", 0.0, 0.02),
        500,
        SearchOptions::default(),
    )
    .unwrap();

    let best_base = result_base.journeys.iter().map(|j| j.arrival_time).min().unwrap();
    let best_faster = result_faster.journeys.iter().map(|j| j.arrival_time).min().unwrap();
    assert!(best_faster <= best_base);
}

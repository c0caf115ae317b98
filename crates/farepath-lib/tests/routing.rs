mod common;

use common::{code, offer, registry};
use farepath_lib::{plan_itinerary, Error, FlightGraph};

#[test]
fn direct_only_service_yields_a_direct_itinerary() {
    let registry = registry(&["JFK", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.add_offer(offer("JFK", "LHR", 542.0));

    let itinerary = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    assert!(itinerary.is_direct);
    assert_eq!(itinerary.total_price, 542.0);
    assert_eq!(itinerary.stops, 0);
    assert_eq!(itinerary.legs.len(), 1);
}

#[test]
fn expensive_direct_loses_to_the_connection() {
    // Connecting total 400; 600 > 400 * 1.30 = 520, so the stop is worth it.
    let registry = registry(&["JFK", "BOS", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.extend([
        offer("JFK", "BOS", 100.0),
        offer("BOS", "LHR", 300.0),
        offer("JFK", "LHR", 600.0),
    ]);

    let itinerary = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    assert!(!itinerary.is_direct);
    assert_eq!(itinerary.total_price, 400.0);
    assert_eq!(itinerary.stops, 1);
}

#[test]
fn direct_within_the_premium_wins_despite_costing_more() {
    // 510 <= 400 * 1.30, so the nonstop is preferred.
    let registry = registry(&["JFK", "BOS", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.extend([
        offer("JFK", "BOS", 100.0),
        offer("BOS", "LHR", 300.0),
        offer("JFK", "LHR", 510.0),
    ]);

    let itinerary = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    assert!(itinerary.is_direct);
    assert_eq!(itinerary.total_price, 510.0);
    assert_eq!(itinerary.stops, 0);
}

#[test]
fn unknown_airport_fails_before_any_graph_access() {
    let registry = registry(&["JFK", "LHR"]);
    let graph = FlightGraph::new();

    let error = plan_itinerary(&registry, &graph, "JFK", "ZZZ").expect_err("unknown code");
    assert!(matches!(error, Error::UnknownAirport { .. }));
    assert!(format!("{error}").contains("unknown airport code: ZZZ"));
}

#[test]
fn unknown_airport_error_suggests_similar_codes() {
    let registry = registry(&["JFK", "LHR", "BOS"]);
    let graph = FlightGraph::new();

    let error = plan_itinerary(&registry, &graph, "JFQ", "LHR").expect_err("unknown code");
    assert!(format!("{error}").contains("Did you mean"));
    assert!(format!("{error}").contains("JFK"));
}

#[test]
fn malformed_code_is_rejected() {
    let registry = registry(&["JFK", "LHR"]);
    let graph = FlightGraph::new();

    let error = plan_itinerary(&registry, &graph, "J2K", "LHR").expect_err("malformed code");
    assert!(matches!(error, Error::InvalidAirportCode { .. }));
}

#[test]
fn identical_endpoints_are_rejected() {
    let registry = registry(&["JFK", "LHR"]);
    let graph = FlightGraph::new();

    let error = plan_itinerary(&registry, &graph, "JFK", "jfk").expect_err("same airport");
    assert!(matches!(error, Error::SameAirport { .. }));
}

#[test]
fn unreachable_destination_is_a_no_route_result() {
    let registry = registry(&["JFK", "LHR", "CDG"]);
    let mut graph = FlightGraph::new();
    graph.add_offer(offer("JFK", "LHR", 542.0));

    let error = plan_itinerary(&registry, &graph, "JFK", "CDG").expect_err("no route");
    assert!(matches!(error, Error::NoRouteFound { .. }));
    assert!(format!("{error}").contains("no route found between JFK and CDG"));
}

#[test]
fn lowercase_input_codes_are_accepted() {
    let registry = registry(&["JFK", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.add_offer(offer("JFK", "LHR", 542.0));

    let itinerary = plan_itinerary(&registry, &graph, "jfk", " lhr ").expect("route exists");
    assert_eq!(itinerary.origin, code("JFK"));
    assert_eq!(itinerary.destination, code("LHR"));
}

#[test]
fn connecting_legs_form_a_contiguous_walk() {
    let registry = registry(&["JFK", "BOS", "KEF", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.extend([
        offer("JFK", "BOS", 90.0),
        offer("BOS", "KEF", 110.0),
        offer("KEF", "LHR", 85.0),
    ]);

    let itinerary = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    assert_eq!(itinerary.stops, 2);
    for pair in itinerary.legs.windows(2) {
        assert_eq!(pair[0].destination, pair[1].origin);
    }
    assert_eq!(itinerary.legs[0].origin, code("JFK"));
    assert_eq!(
        itinerary.legs.last().expect("non-empty legs").destination,
        code("LHR")
    );
}

#[test]
fn planning_twice_yields_identical_itineraries() {
    let registry = registry(&["JFK", "BOS", "LHR"]);
    let mut graph = FlightGraph::new();
    graph.extend([
        offer("JFK", "BOS", 100.0),
        offer("BOS", "LHR", 300.0),
        offer("JFK", "LHR", 600.0),
    ]);

    let first = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    let second = plan_itinerary(&registry, &graph, "JFK", "LHR").expect("route exists");
    assert_eq!(first, second);
}

mod common;

use common::{code, offer};
use farepath_lib::{
    populate_graph, AirportCode, FallbackProvider, FlightGraph, FlightProvider, SyntheticProvider,
};

fn pairs_with_service(provider: &SyntheticProvider, codes: &[AirportCode]) -> usize {
    let mut served = 0;
    for &origin in codes {
        for &destination in codes {
            if origin == destination {
                continue;
            }
            let offers = provider
                .offers_between(origin, destination)
                .expect("synthetic offers never fail");
            if !offers.is_empty() {
                served += 1;
            }
        }
    }
    served
}

fn fixture_codes() -> Vec<AirportCode> {
    ["JFK", "LHR", "BOS", "CDG", "NRT", "SYD", "DXB", "SIN"]
        .iter()
        .map(|input| code(input))
        .collect()
}

#[test]
fn offers_follow_the_record_schema() {
    let provider = SyntheticProvider::new(7);
    for &origin in &fixture_codes() {
        for &destination in &fixture_codes() {
            if origin == destination {
                continue;
            }
            for offer in provider
                .offers_between(origin, destination)
                .expect("synthetic offers never fail")
            {
                assert_eq!(offer.origin, origin);
                assert_eq!(offer.destination, destination);
                assert!(offer.price >= 100.0 && offer.price <= 1500.0);
                assert!(!offer.airline.is_empty());
                assert!(offer.duration_minutes >= 60);
            }
        }
    }
}

#[test]
fn generation_is_deterministic_for_a_seed() {
    let first = SyntheticProvider::new(42);
    let second = SyntheticProvider::new(42);

    for &origin in &fixture_codes() {
        for &destination in &fixture_codes() {
            if origin == destination {
                continue;
            }
            let a = first
                .offers_between(origin, destination)
                .expect("synthetic offers never fail");
            let b = second
                .offers_between(origin, destination)
                .expect("synthetic offers never fail");
            assert_eq!(a, b);
        }
    }
}

#[test]
fn same_pair_queries_repeat_identically() {
    let provider = SyntheticProvider::new(3);
    let a = provider
        .offers_between(code("JFK"), code("LHR"))
        .expect("synthetic offers never fail");
    let b = provider
        .offers_between(code("JFK"), code("LHR"))
        .expect("synthetic offers never fail");
    assert_eq!(a, b);
}

#[test]
fn some_pairs_have_no_service() {
    let provider = SyntheticProvider::new(11);
    let codes = fixture_codes();
    let served = pairs_with_service(&provider, &codes);
    let total = codes.len() * (codes.len() - 1);

    assert!(served > 0, "a seeded network with no service at all");
    assert!(served < total, "every pair served defeats the sparse model");
}

#[test]
fn identical_endpoints_yield_no_offers() {
    let provider = SyntheticProvider::new(5);
    let offers = provider
        .offers_between(code("JFK"), code("JFK"))
        .expect("synthetic offers never fail");
    assert!(offers.is_empty());
}

#[test]
fn populate_graph_inserts_every_generated_offer() {
    let provider = SyntheticProvider::new(7);
    let codes = fixture_codes();

    let mut graph = FlightGraph::new();
    let inserted =
        populate_graph(&mut graph, &provider, &codes).expect("population succeeds");

    assert_eq!(inserted, graph.offer_count());
    assert!(inserted > 0, "a seeded network with no offers at all");
}

struct FailingProvider;

impl FlightProvider for FailingProvider {
    fn offers_between(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> farepath_lib::Result<Vec<farepath_lib::FlightOffer>> {
        Err(farepath_lib::Error::NoRouteFound {
            origin,
            destination,
        })
    }
}

#[test]
fn fallback_provider_substitutes_on_primary_failure() {
    let provider = FallbackProvider::new(FailingProvider, SyntheticProvider::new(7));
    let expected = SyntheticProvider::new(7)
        .offers_between(code("JFK"), code("LHR"))
        .expect("synthetic offers never fail");

    let offers = provider
        .offers_between(code("JFK"), code("LHR"))
        .expect("fallback supplies offers");
    assert_eq!(offers, expected);
}

#[test]
fn fallback_provider_prefers_the_primary_when_it_works() {
    struct FixedProvider;

    impl FlightProvider for FixedProvider {
        fn offers_between(
            &self,
            _origin: AirportCode,
            _destination: AirportCode,
        ) -> farepath_lib::Result<Vec<farepath_lib::FlightOffer>> {
            Ok(vec![offer("JFK", "LHR", 542.0)])
        }
    }

    let provider = FallbackProvider::new(FixedProvider, SyntheticProvider::new(7));
    let offers = provider
        .offers_between(code("JFK"), code("LHR"))
        .expect("primary supplies offers");
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].price, 542.0);
}

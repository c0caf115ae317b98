use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::airport::AirportCode;
use crate::graph::FlightGraph;
use crate::offer::FlightOffer;

/// Cheapest path produced by [`cheapest_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Legs in travel order; each leg departs from the previous leg's
    /// destination.
    pub legs: Vec<FlightOffer>,
    /// Sum of leg prices.
    pub total_price: f64,
}

impl PathResult {
    /// Number of intermediate stops (legs minus one).
    pub fn stops(&self) -> usize {
        self.legs.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm to find the cheapest itinerary from `origin`
/// to `destination`, weight = offer price.
///
/// The graph guarantees non-negative weights, so the search can stop as
/// soon as the destination is extracted from the frontier. Among
/// equal-cost paths the search prefers fewer legs; remaining ties resolve
/// by ascending destination code during relaxation, so the result is
/// deterministic and independent of offer insertion order. Returns `None`
/// when the destination is unreachable.
pub fn cheapest_path(
    graph: &FlightGraph,
    origin: AirportCode,
    destination: AirportCode,
) -> Option<PathResult> {
    if origin == destination {
        return Some(PathResult {
            legs: Vec::new(),
            total_price: 0.0,
        });
    }

    let mut best: HashMap<AirportCode, Best> = HashMap::new();
    let mut inbound: HashMap<AirportCode, FlightOffer> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(origin, Best { cost: 0.0, legs: 0 });
    frontier.push(QueueEntry::new(origin, 0.0, 0));

    while let Some(entry) = frontier.pop() {
        let known = match best.get(&entry.code) {
            Some(known) => *known,
            None => continue,
        };
        if entry.cost.0 > known.cost || (entry.cost.0 == known.cost && entry.legs > known.legs) {
            // Stale frontier entry superseded by a better relaxation.
            continue;
        }

        if entry.code == destination {
            return Some(reconstruct(&inbound, origin, destination, known.cost));
        }

        for offer in graph.best_offers(entry.code) {
            let next_cost = known.cost + offer.price;
            let next_legs = known.legs + 1;
            let improves = match best.get(&offer.destination) {
                Some(current) => {
                    next_cost < current.cost
                        || (next_cost == current.cost && next_legs < current.legs)
                }
                None => true,
            };
            if improves {
                best.insert(
                    offer.destination,
                    Best {
                        cost: next_cost,
                        legs: next_legs,
                    },
                );
                inbound.insert(offer.destination, offer.clone());
                frontier.push(QueueEntry::new(offer.destination, next_cost, next_legs));
            }
        }
    }

    None
}

fn reconstruct(
    inbound: &HashMap<AirportCode, FlightOffer>,
    origin: AirportCode,
    destination: AirportCode,
    total_price: f64,
) -> PathResult {
    let mut legs = Vec::new();
    let mut current = destination;
    while current != origin {
        let offer = inbound
            .get(&current)
            .expect("inbound offer recorded for every reached airport")
            .clone();
        current = offer.origin;
        legs.push(offer);
    }
    legs.reverse();

    PathResult { legs, total_price }
}

#[derive(Debug, Clone, Copy)]
struct Best {
    cost: f64,
    legs: usize,
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct QueueEntry {
    code: AirportCode,
    cost: FloatOrd,
    legs: usize,
}

impl QueueEntry {
    fn new(code: AirportCode, cost: f64, legs: usize) -> Self {
        Self {
            code,
            cost: FloatOrd(cost),
            legs,
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then
        // by leg count for equal costs.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.legs.cmp(&self.legs))
            .then_with(|| other.code.cmp(&self.code))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

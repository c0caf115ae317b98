use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::airport::AirportCode;
use crate::offer::FlightOffer;

/// Directed multigraph of airports connected by flight offers.
///
/// Nodes are the airport codes appearing in at least one offer; parallel
/// offers between the same pair are all retained, and the search layer asks
/// for the per-destination cheapest via [`FlightGraph::best_offers`]. An
/// edge A->B does not imply B->A exists. The graph is not mutated after
/// population, so shared references (or an `Arc`) can serve concurrent
/// route queries.
#[derive(Debug, Clone, Default)]
pub struct FlightGraph {
    adjacency: HashMap<AirportCode, Vec<FlightOffer>>,
    offer_count: usize,
}

impl FlightGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an offer as a directed edge, creating endpoint nodes as
    /// needed. Offer invariants (no self-loop, non-negative price) are
    /// guaranteed by [`FlightOffer::new`].
    pub fn add_offer(&mut self, offer: FlightOffer) {
        self.adjacency.entry(offer.destination).or_default();
        self.adjacency.entry(offer.origin).or_default().push(offer);
        self.offer_count += 1;
    }

    /// Bulk insertion of offers.
    pub fn extend(&mut self, offers: impl IntoIterator<Item = FlightOffer>) {
        for offer in offers {
            self.add_offer(offer);
        }
    }

    /// All outgoing offers from an airport, in insertion order. Callers
    /// must not rely on the order for correctness.
    pub fn neighbors(&self, code: AirportCode) -> &[FlightOffer] {
        self.adjacency
            .get(&code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The cheapest outgoing offer per destination, ties broken by earliest
    /// departure then airline name. Sorted by destination code so traversal
    /// order does not depend on insertion order.
    pub fn best_offers(&self, code: AirportCode) -> Vec<&FlightOffer> {
        let mut best: HashMap<AirportCode, &FlightOffer> = HashMap::new();
        for offer in self.neighbors(code) {
            match best.entry(offer.destination) {
                Entry::Occupied(mut slot) => {
                    if compare_offers(offer, slot.get()) == Ordering::Less {
                        slot.insert(offer);
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(offer);
                }
            }
        }

        let mut offers: Vec<&FlightOffer> = best.into_values().collect();
        offers.sort_by_key(|offer| offer.destination);
        offers
    }

    /// The cheapest direct offer between a pair, if any service exists.
    pub fn direct_offer(
        &self,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Option<&FlightOffer> {
        self.neighbors(origin)
            .iter()
            .filter(|offer| offer.destination == destination)
            .min_by(|a, b| compare_offers(a, b))
    }

    /// Number of airports that appear in at least one offer.
    pub fn airport_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Total number of offers held, counting parallel edges.
    pub fn offer_count(&self) -> usize {
        self.offer_count
    }

    /// Iterate over all airports known to the graph.
    pub fn airports(&self) -> impl Iterator<Item = AirportCode> + '_ {
        self.adjacency.keys().copied()
    }
}

/// Preference order among parallel offers: lower price, then earlier
/// departure, then airline name.
fn compare_offers(a: &FlightOffer, b: &FlightOffer) -> Ordering {
    a.price
        .total_cmp(&b.price)
        .then_with(|| a.departure.cmp(&b.departure))
        .then_with(|| a.airline.cmp(&b.airline))
}

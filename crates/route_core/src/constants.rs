/// Edge weight type
pub type Weight = f64;
/// Identifier of a city in the map. Must be non-empty and unique.
pub type NodeId = String;

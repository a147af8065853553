pub mod roster;

pub use roster::{
    default_roster, load_roster, parse_roster_json, parse_roster_yaml, validate_roster, Roster,
    ShipTemplate,
};

pub mod base_load;
pub mod cooktop;
pub mod ev_charging;
pub mod hot_water;
pub mod space_heating;

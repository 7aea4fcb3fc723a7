pub mod campground;
pub mod custom_trip;
pub mod trip;

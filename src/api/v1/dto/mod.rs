pub mod places_search;

use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{Meal, MealCreationRequestInput};

impl Client {
    endpoints! {
        /// Fetches a single meal.
        read GET get_meal[meal_id] -> Meal = "/api/v1/meals/{meal_id}";
        exists meal_exists[meal_id] = "/api/v1/meals/{meal_id}";

        list get_meals[] -> Meal = "/api/v1/meals";

        /// Searches meals by name.
        search search_for_meals[] -> Meal = "/api/v1/meals/search";

        write POST create_meal[](MealCreationRequestInput) -> Meal = "/api/v1/meals";

        /// Archives a meal. Archived meals stay addressable by ID.
        act DELETE archive_meal[meal_id] = "/api/v1/meals/{meal_id}";
    }
}

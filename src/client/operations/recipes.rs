use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    Recipe, RecipeCreationRequestInput, RecipeRating, RecipeRatingCreationRequestInput,
    RecipeRatingUpdateRequestInput, RecipeUpdateRequestInput,
};

impl Client {
    endpoints! {
        read GET get_recipe[recipe_id] -> Recipe = "/api/v1/recipes/{recipe_id}";
        exists recipe_exists[recipe_id] = "/api/v1/recipes/{recipe_id}";
        list get_recipes[] -> Recipe = "/api/v1/recipes";
        search search_for_recipes[] -> Recipe = "/api/v1/recipes/search";
        write POST create_recipe[](RecipeCreationRequestInput) -> Recipe = "/api/v1/recipes";
        write PUT update_recipe[recipe_id](RecipeUpdateRequestInput) -> Recipe = "/api/v1/recipes/{recipe_id}";
        act DELETE archive_recipe[recipe_id] = "/api/v1/recipes/{recipe_id}";

        /// Copies a recipe into a new one owned by the calling user.
        read POST clone_recipe[recipe_id] -> Recipe = "/api/v1/recipes/{recipe_id}/clone";
    }

    // Ratings
    endpoints! {
        read GET get_recipe_rating[recipe_id, recipe_rating_id] -> RecipeRating =
            "/api/v1/recipes/{recipe_id}/ratings/{recipe_rating_id}";
        list get_recipe_ratings[recipe_id] -> RecipeRating = "/api/v1/recipes/{recipe_id}/ratings";
        write POST create_recipe_rating[recipe_id](RecipeRatingCreationRequestInput) -> RecipeRating =
            "/api/v1/recipes/{recipe_id}/ratings";
        write PUT update_recipe_rating[recipe_id, recipe_rating_id](RecipeRatingUpdateRequestInput) -> RecipeRating =
            "/api/v1/recipes/{recipe_id}/ratings/{recipe_rating_id}";
        act DELETE archive_recipe_rating[recipe_id, recipe_rating_id] =
            "/api/v1/recipes/{recipe_id}/ratings/{recipe_rating_id}";
    }
}

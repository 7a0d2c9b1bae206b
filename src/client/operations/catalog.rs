//! The shared catalog of ingredients, preparations, and vessels recipes draw on.

use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    ValidIngredient, ValidIngredientCreationRequestInput, ValidIngredientGroup,
    ValidIngredientGroupCreationRequestInput, ValidIngredientGroupUpdateRequestInput,
    ValidIngredientUpdateRequestInput, ValidPreparation, ValidPreparationCreationRequestInput,
    ValidPreparationUpdateRequestInput, ValidVessel, ValidVesselCreationRequestInput,
    ValidVesselUpdateRequestInput,
};

impl Client {
    endpoints! {
        read GET get_valid_ingredient[valid_ingredient_id] -> ValidIngredient =
            "/api/v1/valid_ingredients/{valid_ingredient_id}";
        exists valid_ingredient_exists[valid_ingredient_id] =
            "/api/v1/valid_ingredients/{valid_ingredient_id}";
        read GET get_random_valid_ingredient[] -> ValidIngredient = "/api/v1/valid_ingredients/random";
        list get_valid_ingredients[] -> ValidIngredient = "/api/v1/valid_ingredients";
        search search_for_valid_ingredients[] -> ValidIngredient = "/api/v1/valid_ingredients/search";

        /// Searches the ingredients that can be prepared with `valid_preparation_id`.
        search search_valid_ingredients_by_preparation[valid_preparation_id] -> ValidIngredient =
            "/api/v1/valid_ingredients/by_preparation/{valid_preparation_id}";

        write POST create_valid_ingredient[](ValidIngredientCreationRequestInput) -> ValidIngredient =
            "/api/v1/valid_ingredients";
        write PUT update_valid_ingredient[valid_ingredient_id](ValidIngredientUpdateRequestInput) -> ValidIngredient =
            "/api/v1/valid_ingredients/{valid_ingredient_id}";
        act DELETE archive_valid_ingredient[valid_ingredient_id] =
            "/api/v1/valid_ingredients/{valid_ingredient_id}";
    }

    endpoints! {
        read GET get_valid_ingredient_group[valid_ingredient_group_id] -> ValidIngredientGroup =
            "/api/v1/valid_ingredient_groups/{valid_ingredient_group_id}";
        exists valid_ingredient_group_exists[valid_ingredient_group_id] =
            "/api/v1/valid_ingredient_groups/{valid_ingredient_group_id}";
        list get_valid_ingredient_groups[] -> ValidIngredientGroup = "/api/v1/valid_ingredient_groups";
        search search_for_valid_ingredient_groups[] -> ValidIngredientGroup =
            "/api/v1/valid_ingredient_groups/search";
        write POST create_valid_ingredient_group[](ValidIngredientGroupCreationRequestInput) -> ValidIngredientGroup =
            "/api/v1/valid_ingredient_groups";
        write PUT update_valid_ingredient_group[valid_ingredient_group_id](ValidIngredientGroupUpdateRequestInput)
            -> ValidIngredientGroup = "/api/v1/valid_ingredient_groups/{valid_ingredient_group_id}";
        act DELETE archive_valid_ingredient_group[valid_ingredient_group_id] =
            "/api/v1/valid_ingredient_groups/{valid_ingredient_group_id}";
    }

    endpoints! {
        read GET get_valid_preparation[valid_preparation_id] -> ValidPreparation =
            "/api/v1/valid_preparations/{valid_preparation_id}";
        exists valid_preparation_exists[valid_preparation_id] =
            "/api/v1/valid_preparations/{valid_preparation_id}";
        read GET get_random_valid_preparation[] -> ValidPreparation = "/api/v1/valid_preparations/random";
        list get_valid_preparations[] -> ValidPreparation = "/api/v1/valid_preparations";
        search search_for_valid_preparations[] -> ValidPreparation = "/api/v1/valid_preparations/search";
        write POST create_valid_preparation[](ValidPreparationCreationRequestInput) -> ValidPreparation =
            "/api/v1/valid_preparations";
        write PUT update_valid_preparation[valid_preparation_id](ValidPreparationUpdateRequestInput) -> ValidPreparation =
            "/api/v1/valid_preparations/{valid_preparation_id}";
        act DELETE archive_valid_preparation[valid_preparation_id] =
            "/api/v1/valid_preparations/{valid_preparation_id}";
    }

    endpoints! {
        read GET get_valid_vessel[valid_vessel_id] -> ValidVessel = "/api/v1/valid_vessels/{valid_vessel_id}";
        exists valid_vessel_exists[valid_vessel_id] = "/api/v1/valid_vessels/{valid_vessel_id}";
        read GET get_random_valid_vessel[] -> ValidVessel = "/api/v1/valid_vessels/random";
        list get_valid_vessels[] -> ValidVessel = "/api/v1/valid_vessels";
        search search_for_valid_vessels[] -> ValidVessel = "/api/v1/valid_vessels/search";
        write POST create_valid_vessel[](ValidVesselCreationRequestInput) -> ValidVessel = "/api/v1/valid_vessels";
        write PUT update_valid_vessel[valid_vessel_id](ValidVesselUpdateRequestInput) -> ValidVessel =
            "/api/v1/valid_vessels/{valid_vessel_id}";
        act DELETE archive_valid_vessel[valid_vessel_id] = "/api/v1/valid_vessels/{valid_vessel_id}";
    }
}

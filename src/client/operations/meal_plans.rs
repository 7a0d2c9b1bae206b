use crate::client::client::Client;
use crate::client::operations::endpoints;
use crate::client::types::{
    FinalizeMealPlansResponse, MealPlan, MealPlanCreationRequestInput, MealPlanGroceryListItem,
    MealPlanGroceryListItemCreationRequestInput, MealPlanGroceryListItemUpdateRequestInput,
    MealPlanTask, MealPlanTaskCreationRequestInput, MealPlanTaskStatusChangeRequestInput,
    MealPlanUpdateRequestInput,
};

impl Client {
    endpoints! {
        read GET get_meal_plan[meal_plan_id] -> MealPlan = "/api/v1/meal_plans/{meal_plan_id}";
        exists meal_plan_exists[meal_plan_id] = "/api/v1/meal_plans/{meal_plan_id}";
        list get_meal_plans[] -> MealPlan = "/api/v1/meal_plans";
        write POST create_meal_plan[](MealPlanCreationRequestInput) -> MealPlan = "/api/v1/meal_plans";
        write PUT update_meal_plan[meal_plan_id](MealPlanUpdateRequestInput) -> MealPlan =
            "/api/v1/meal_plans/{meal_plan_id}";
        act DELETE archive_meal_plan[meal_plan_id] = "/api/v1/meal_plans/{meal_plan_id}";

        /// Closes voting on a meal plan and picks the winning options.
        read POST finalize_meal_plan[meal_plan_id] -> FinalizeMealPlansResponse =
            "/api/v1/meal_plans/{meal_plan_id}/finalize";
    }

    // Tasks
    endpoints! {
        read GET get_meal_plan_task[meal_plan_id, meal_plan_task_id] -> MealPlanTask =
            "/api/v1/meal_plans/{meal_plan_id}/tasks/{meal_plan_task_id}";
        list get_meal_plan_tasks[meal_plan_id] -> MealPlanTask = "/api/v1/meal_plans/{meal_plan_id}/tasks";
        write POST create_meal_plan_task[meal_plan_id](MealPlanTaskCreationRequestInput) -> MealPlanTask =
            "/api/v1/meal_plans/{meal_plan_id}/tasks";
        apply PATCH update_meal_plan_task_status[meal_plan_id, meal_plan_task_id](MealPlanTaskStatusChangeRequestInput) =
            "/api/v1/meal_plans/{meal_plan_id}/tasks/{meal_plan_task_id}";
    }

    // Grocery list
    endpoints! {
        read GET get_meal_plan_grocery_list_item[meal_plan_id, meal_plan_grocery_list_item_id] -> MealPlanGroceryListItem =
            "/api/v1/meal_plans/{meal_plan_id}/grocery_list_items/{meal_plan_grocery_list_item_id}";
        list get_meal_plan_grocery_list_items[meal_plan_id] -> MealPlanGroceryListItem =
            "/api/v1/meal_plans/{meal_plan_id}/grocery_list_items";
        write POST create_meal_plan_grocery_list_item[meal_plan_id](MealPlanGroceryListItemCreationRequestInput)
            -> MealPlanGroceryListItem = "/api/v1/meal_plans/{meal_plan_id}/grocery_list_items";
        write PUT update_meal_plan_grocery_list_item[meal_plan_id, meal_plan_grocery_list_item_id](MealPlanGroceryListItemUpdateRequestInput)
            -> MealPlanGroceryListItem =
            "/api/v1/meal_plans/{meal_plan_id}/grocery_list_items/{meal_plan_grocery_list_item_id}";
        act DELETE archive_meal_plan_grocery_list_item[meal_plan_id, meal_plan_grocery_list_item_id] =
            "/api/v1/meal_plans/{meal_plan_id}/grocery_list_items/{meal_plan_grocery_list_item_id}";
    }
}

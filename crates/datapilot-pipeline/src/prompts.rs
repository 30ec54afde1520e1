// SPDX-FileCopyrightText: 2026 Datapilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates for the provider-backed pipeline steps.
//!
//! Wording quality is not a contract here; structure is. Each template
//! carries the schema digest plus the state fields its step needs, with
//! simple `{placeholder}` substitution.

/// Digest of the e-commerce dataset shared by every prompt.
const SCHEMA_DIGEST: &str = "\
Available database schema (7 interconnected tables):

1. regions - Geographic sales territories
   - id, name, country, timezone
2. categories - Product categories with margin data
   - id, name, description, margin_percentage
3. sales_reps - Sales team information
   - id, first_name, last_name, email, phone, region_id, hire_date, commission_rate, is_active
4. customers - Customer information
   - id, first_name, last_name, email, phone, company, address, city, state, region_id, customer_since, credit_limit, is_active
5. products - Product catalog
   - id, name, sku, category_id, description, unit_price, cost, weight_kg, stock_quantity, reorder_level, is_active, created_date
6. orders - Order header information
   - id, customer_id, sales_rep_id, order_date, ship_date, delivery_date, status, shipping_cost, tax_amount, discount_amount, notes
   - Valid status values: 'pending', 'shipped', 'delivered' (all lowercase)
7. order_items - Individual line items within orders
   - id, order_id, product_id, quantity, unit_price, discount_percentage

Key relationships:
- customers.region_id -> regions.id
- sales_reps.region_id -> regions.id
- products.category_id -> categories.id
- orders.customer_id -> customers.id
- orders.sales_rep_id -> sales_reps.id
- order_items.order_id -> orders.id
- order_items.product_id -> products.id";

const PLANNER_TEMPLATE: &str = "\
You are an expert data analysis planner. Create a step-by-step plan to answer the user's data question.

{schema}

For each step in your plan, specify:
- Step number
- Action to take
- Description of what this step accomplishes
- Whether it requires SQL execution (true/false)
- Whether it requires chart generation (true/false)

USER QUESTION: {user_query}

PLAN:";

const SQL_TEMPLATE: &str = "\
You are an expert SQL developer. Write a SQL query to answer the user's question.

{schema}

IMPORTANT CONSTRAINTS:
1. Write ONLY SELECT statements (no INSERT, UPDATE, DELETE, etc.)
2. Do not use semicolons except at the end of the query
3. Use appropriate JOINs to connect related tables
4. Use appropriate aggregations, groupings, and filters based on the question
5. Limit results to a reasonable number if appropriate (e.g., LIMIT 50)
6. Calculate revenue using: quantity * unit_price * (1 - discount_percentage/100)

USER QUESTION: {user_query}
PLAN: {plan}

SQL QUERY:";

const CHART_TEMPLATE: &str = "\
You are an expert data visualization specialist. Choose an appropriate chart for the query results.

Available data:
- SQL Query: {sql}
- Query Results: First few rows: {sample_rows}

RESPONSE FORMAT:
```json
{
  \"chart_type\": \"bar|line|scatter|pie|histogram\",
  \"x_column\": \"column_name\",
  \"y_column\": \"column_name\",
  \"title\": \"Suggested chart title\"
}
```

USER QUESTION: {user_query}
CHART RECOMMENDATION:";

const EXPLAINER_TEMPLATE: &str = "\
You are an expert data analyst and communicator. Explain the results of a data analysis in clear, concise language that answers the user's original question.

Available information:
- Original question: {user_query}
- SQL query used (if applicable): {sql}
- Query error (if applicable): {sql_error}
- Query results (if applicable): {sample_rows}
- Chart generated (if applicable): {chart_path}

Reference specific data points from the results, refer to the chart if one was generated, and if the query failed, acknowledge the failure and answer as best you can. Keep your explanation under 200 words.

EXPLANATION:";

/// Renders the planner prompt.
///
/// The default planning step builds its plan heuristically and never sends
/// this; it pairs with [`crate::planner::parse_plan`] for embedders that
/// want a model-written plan instead.
pub fn planner_prompt(user_query: &str) -> String {
    PLANNER_TEMPLATE
        .replace("{schema}", SCHEMA_DIGEST)
        .replace("{user_query}", user_query)
}

/// Renders the SQL-generation prompt.
pub fn sql_prompt(user_query: &str, plan_digest: &str) -> String {
    SQL_TEMPLATE
        .replace("{schema}", SCHEMA_DIGEST)
        .replace("{user_query}", user_query)
        .replace("{plan}", plan_digest)
}

/// Renders the chart-recommendation prompt.
pub fn chart_prompt(user_query: &str, sql: &str, sample_rows: &str) -> String {
    CHART_TEMPLATE
        .replace("{sql}", sql)
        .replace("{sample_rows}", sample_rows)
        .replace("{user_query}", user_query)
}

/// Renders the explanation prompt.
pub fn explainer_prompt(
    user_query: &str,
    sql: &str,
    sql_error: &str,
    sample_rows: &str,
    chart_path: &str,
) -> String {
    EXPLAINER_TEMPLATE
        .replace("{user_query}", user_query)
        .replace("{sql}", sql)
        .replace("{sql_error}", sql_error)
        .replace("{sample_rows}", sample_rows)
        .replace("{chart_path}", chart_path)
}

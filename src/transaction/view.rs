//! HTML rendering for the transactions page.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency, truncate_description,
    },
    navigation::NavBar,
    transaction::{
        core::{Transaction, TransactionType},
        filter::{TransactionFilter, TypeFilter},
    },
};

/// The ID of the element replaced when the filters change.
pub const TRANSACTIONS_TABLE_ID: &str = "transactions-table";

pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this transaction?";

const DISPLAY_DATE: &[BorrowedFormatItem] =
    format_description!("[month repr:short] [day padding:none], [year]");

fn amount_class(type_: TransactionType) -> &'static str {
    match type_ {
        TransactionType::Expense => "text-red-700 dark:text-red-300",
        TransactionType::Income => "text-green-700 dark:text-green-300",
    }
}

/// The amount with a sign showing its direction, e.g. "-$40.00".
pub fn signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.type_ {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    format!("{sign}{}", format_currency(transaction.amount))
}

pub fn display_date(date: Date) -> String {
    date.format(DISPLAY_DATE).unwrap_or_else(|_| date.to_string())
}

/// The full transactions page: filters above the table.
pub fn transactions_view(transactions: &[Transaction], filter: &TransactionFilter) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (filter_form(filter))

                (transactions_table(transactions, filter))
            }
        }
    };

    base("Transactions", &[], &content)
}

fn filter_form(filter: &TransactionFilter) -> Markup {
    let type_options = [
        (TypeFilter::All, "All"),
        (TypeFilter::Income, "Income"),
        (TypeFilter::Expense, "Expense"),
    ];

    html! {
        form
            id="transaction-filters"
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-trigger="input changed delay:300ms from:#search, change from:#type, submit"
            hx-target={ "#" (TRANSACTIONS_TABLE_ID) }
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-target-error="#alert-container"
            hx-indicator="#filter-indicator"
            class="grid gap-4 sm:grid-cols-3"
        {
            div class="sm:col-span-2"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }
                input
                    type="search"
                    name="search"
                    id="search"
                    placeholder="Search by description or category"
                    value=(filter.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="type" class=(FORM_LABEL_STYLE) { "Type" }
                select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                {
                    @for (option, label) in type_options {
                        option value=(option.as_str()) selected[filter.type_filter == option]
                        {
                            (label)
                        }
                    }
                }
            }

            span id="filter-indicator" class="htmx-indicator text-sm text-gray-500"
            {
                "Loading..."
            }
        }
    }
}

/// The table of transactions, or the empty state when there are none to show.
///
/// This is the partial returned to htmx when the filters change.
pub fn transactions_table(transactions: &[Transaction], filter: &TransactionFilter) -> Markup {
    html! {
        section id=(TRANSACTIONS_TABLE_ID) class="w-full overflow-x-auto dark:bg-gray-800"
        {
            @if transactions.is_empty() {
                (empty_state(filter))
            } @else {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                            th scope="col" class="px-6 py-3 text-right" { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row_view(transaction))
                        }
                    }
                }
            }
        }
    }
}

fn empty_state(filter: &TransactionFilter) -> Markup {
    html! {
        div class="px-6 py-8 text-center text-gray-500 dark:text-gray-400" data-empty-state="true"
        {
            h3 class="font-semibold text-gray-900 dark:text-white" { "No transactions found" }

            @if filter.is_active() {
                p { "No transactions match your search criteria." }
            } @else {
                p { "Get started by creating a new transaction." }
                a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                {
                    "Add Transaction"
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (description, tooltip) = truncate_description(&transaction.description);
    let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id);
    let delete_url = format_endpoint(endpoints::TRANSACTION_API, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(transaction.date) { (display_date(transaction.date)) }
            }
            td class=(TABLE_CELL_STYLE) title=[tooltip] { (description) }
            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }
            td class=(TABLE_CELL_STYLE) { (transaction.type_.label()) }
            td class={ "px-6 py-4 text-right " (amount_class(transaction.type_)) }
            {
                (signed_amount(transaction))
            }
            td class=(TABLE_CELL_STYLE)
            {
                div class="flex gap-4"
                {
                    a href=(edit_url) class=(LINK_STYLE) { "Edit" }

                    button
                        type="button"
                        hx-delete=(delete_url)
                        hx-confirm=(DELETE_CONFIRM_MESSAGE)
                        hx-target="closest tr"
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        hx-disabled-elt="this"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::assert_valid_html,
        transaction::{
            TransactionFilter, TransactionType, TypeFilter,
            test_utils::{salary_lunch_dinner, transaction},
        },
    };

    use super::{
        DELETE_CONFIRM_MESSAGE, display_date, signed_amount, transactions_table,
        transactions_view,
    };

    fn render_table(transactions: &[crate::Transaction], filter: &TransactionFilter) -> Html {
        Html::parse_fragment(&transactions_table(transactions, filter).into_string())
    }

    #[track_caller]
    fn must_get_rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("tbody tr").unwrap()).collect()
    }

    #[test]
    fn page_is_valid_html() {
        let markup = transactions_view(&salary_lunch_dinner(), &TransactionFilter::default());
        let document = Html::parse_document(&markup.into_string());

        assert_valid_html(&document);
    }

    #[test]
    fn renders_one_row_per_transaction_with_delete_button() {
        let html = render_table(&salary_lunch_dinner(), &TransactionFilter::default());

        let rows = must_get_rows(&html);
        assert_eq!(rows.len(), 3, "want 3 rows, got {}", rows.len());

        let button_selector = Selector::parse("button[hx-delete]").unwrap();
        for (row, want_id) in rows.iter().zip([1, 2, 3]) {
            let button = row
                .select(&button_selector)
                .next()
                .expect("want a delete button in each row");
            let want_url = format_endpoint(endpoints::TRANSACTION_API, want_id);
            assert_eq!(button.value().attr("hx-delete"), Some(want_url.as_str()));
            assert_eq!(
                button.value().attr("hx-confirm"),
                Some(DELETE_CONFIRM_MESSAGE)
            );
            assert_eq!(button.value().attr("hx-target"), Some("closest tr"));

            let edit_selector = Selector::parse("a").unwrap();
            let edit_url = format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, want_id);
            let edit_link = row.select(&edit_selector).next().unwrap();
            assert_eq!(edit_link.value().attr("href"), Some(edit_url.as_str()));
        }
    }

    #[test]
    fn amounts_carry_sign_of_type() {
        let income = transaction(1, 100.0, TransactionType::Income, "Income", "Salary");
        let expense = transaction(2, 40.0, TransactionType::Expense, "Food", "Lunch");

        assert_eq!(signed_amount(&income), "+$100.00");
        assert_eq!(signed_amount(&expense), "-$40.00");
    }

    #[test]
    fn dates_are_shown_in_short_month_format() {
        assert_eq!(
            display_date(time::macros::date!(2024 - 01 - 05)),
            "Jan 5, 2024"
        );
    }

    #[test]
    fn empty_without_filters_invites_to_create() {
        let html = render_table(&[], &TransactionFilter::default());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions found"), "got {text:?}");
        assert!(
            text.contains("Get started by creating a new transaction."),
            "got {text:?}"
        );
        let link = html
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("want a link to create a transaction");
        assert_eq!(
            link.value().attr("href"),
            Some(endpoints::NEW_TRANSACTION_VIEW)
        );
    }

    #[test]
    fn empty_with_filters_mentions_search_criteria() {
        let filter = TransactionFilter {
            type_filter: TypeFilter::Income,
            search: "rent".to_owned(),
        };

        let html = render_table(&[], &filter);

        let text = html.root_element().text().collect::<String>();
        assert!(
            text.contains("No transactions match your search criteria."),
            "got {text:?}"
        );
        assert_eq!(html.select(&Selector::parse("a").unwrap()).count(), 0);
    }

    #[test]
    fn filter_form_keeps_current_values() {
        let filter = TransactionFilter {
            type_filter: TypeFilter::Expense,
            search: "lunch".to_owned(),
        };
        let markup = transactions_view(&[], &filter);
        let document = Html::parse_document(&markup.into_string());

        let search = document
            .select(&Selector::parse("input[name=search]").unwrap())
            .next()
            .unwrap();
        assert_eq!(search.value().attr("value"), Some("lunch"));
        let selected = document
            .select(&Selector::parse("select[name=type] option[selected]").unwrap())
            .next()
            .unwrap();
        assert_eq!(selected.value().attr("value"), Some("expense"));
    }
}

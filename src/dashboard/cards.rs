//! Summary cards and the recent transactions list.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::DashboardSummary,
    endpoints,
    html::{LINK_STYLE, format_currency},
    transaction::{Transaction, TransactionType, display_date, signed_amount},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

/// Renders the Current Balance, Total Income and Total Expenses cards.
pub(super) fn summary_cards_view(summary: &DashboardSummary) -> Markup {
    let balance = summary.balance();
    let balance_class = if balance < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        section id="summary-cards" class="w-full mx-auto mb-8"
        {
            div class="grid grid-cols-1 md:grid-cols-3 gap-4"
            {
                (summary_card("Current Balance", &format_currency(balance), balance_class))
                (summary_card(
                    "Total Income",
                    &format_currency(summary.total_income),
                    "text-green-700 dark:text-green-300",
                ))
                (summary_card(
                    "Total Expenses",
                    &format_currency(summary.total_expense),
                    "text-red-700 dark:text-red-300",
                ))
            }
        }
    }
}

fn summary_card(title: &str, amount: &str, amount_class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) aria-label={ (title) ": " (amount) }
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400" { (title) }
            p class={ "mt-2 text-2xl font-bold " (amount_class) } { (amount) }
        }
    }
}

/// Renders up to five recent transactions with a link to the full list.
pub(super) fn recent_transactions_view(transactions: &[Transaction]) -> Markup {
    html! {
        section id="recent-transactions" class={ "w-full mx-auto mb-8 " (CARD_STYLE) }
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Recent Transactions" }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            @if transactions.is_empty() {
                div class="py-6 text-center text-gray-500 dark:text-gray-400" data-empty-state="true"
                {
                    p { "No transactions found" }
                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }
            } @else {
                ul class="divide-y divide-gray-200 dark:divide-gray-700"
                {
                    @for transaction in transactions {
                        (recent_transaction_item(transaction))
                    }
                }
            }
        }
    }
}

fn recent_transaction_item(transaction: &Transaction) -> Markup {
    let amount_class = match transaction.type_ {
        TransactionType::Income => "text-green-700 dark:text-green-300",
        TransactionType::Expense => "text-red-700 dark:text-red-300",
    };

    html! {
        li class="flex justify-between py-3" data-transaction-id=(transaction.id)
        {
            div
            {
                p class="font-medium" { (transaction.description) }
                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    (transaction.category) " · "
                    time datetime=(transaction.date) { (display_date(transaction.date)) }
                }
            }

            span class={ "font-semibold " (amount_class) } { (signed_amount(transaction)) }
        }
    }
}

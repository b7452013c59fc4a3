use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CHECKBOX_GROUP_STYLE,
        FORM_CHECKBOX_INPUT_STYLE, FORM_CHECKBOX_LABEL_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_amount, format_count, loading_spinner,
    },
    transactions::{
        ALL_ENCODINGS, AmountSelection, DateRange, DateSelection, FilterResults, Outcome, Summary,
        TextEncoding, TransactionRow,
    },
};

pub(crate) const UPLOAD_PROMPT: &str = "Please upload at least one CSV file to proceed.";
pub(crate) const NO_NAME_MATCHES: &str = "No transactions found for the specified names.";
pub(crate) const NO_TRANSACTIONS: &str = "No transactions available after applying the filters.";
pub(crate) const NO_OTHER_TRANSACTIONS: &str =
    "No other transactions found for the selected sender names.";

/// The form values that live outside the results and are echoed back on full page loads.
pub(crate) struct FormValues<'a> {
    pub encoding: TextEncoding,
    pub names: &'a str,
    pub unique_senders: bool,
}

pub(crate) fn filter_page_view(values: &FormValues, results: &Markup) -> Markup {
    let spinner = loading_spinner();

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="mb-6 text-2xl font-bold" { "Transaction Sieve" }

            form
                id="filter-form"
                action=(endpoints::FILTER_API)
                method="post"
                enctype="multipart/form-data"
                hx-post=(endpoints::FILTER_API)
                hx-trigger="change"
                hx-target="#results"
                hx-swap="innerHTML"
                hx-indicator="#indicator"
                hx-target-error="#alert-container"
                class="w-full max-w-5xl space-y-6"
            {
                div class="grid gap-4 md:grid-cols-2"
                {
                    div
                    {
                        label for="files" class=(FORM_LABEL_STYLE)
                        {
                            "Choose transaction report(s) to upload"
                        }

                        input
                            id="files"
                            type="file"
                            name="files"
                            accept=".csv,text/csv"
                            multiple
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div
                    {
                        label for="encoding" class=(FORM_LABEL_STYLE) { "File encoding" }

                        select id="encoding" name="encoding" class=(FORM_TEXT_INPUT_STYLE)
                        {
                            @for encoding in ALL_ENCODINGS
                            {
                                option value=(encoding.label()) selected[encoding == values.encoding]
                                {
                                    (encoding.label())
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="names" class=(FORM_LABEL_STYLE)
                        {
                            "Sender names (comma separated)"
                        }

                        input
                            id="names"
                            type="text"
                            name="names"
                            placeholder="e.g. anna, bob"
                            value=(values.names)
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div class="flex items-center gap-2 md:mt-7"
                    {
                        input
                            id="unique_senders"
                            type="checkbox"
                            name="unique_senders"
                            value="on"
                            checked[values.unique_senders];

                        label for="unique_senders" class="text-sm font-medium"
                        {
                            "Only show the most recent transaction per sender"
                        }
                    }
                }

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="indicator" { (spinner) }
                    " Apply Filters"
                }

                div id="results" class="space-y-6"
                {
                    (results)
                }
            }
        }
    };

    base("Filter Transactions", &content)
}

/// The part of the page that changes whenever a filter changes.
pub(crate) fn results_view(outcome: Option<&Outcome>, dates: DateSelection) -> Markup {
    match outcome {
        None => notice(UPLOAD_PROMPT),
        Some(Outcome::NoTransactions { date_bounds: None }) => notice(NO_TRANSACTIONS),
        Some(Outcome::NoTransactions {
            date_bounds: Some(bounds),
        }) => html! {
            (date_range_view(*bounds, dates))
            (notice(NO_TRANSACTIONS))
        },
        Some(Outcome::NoNameMatches { date_bounds }) => html! {
            (date_range_view(*date_bounds, dates))
            (notice(NO_NAME_MATCHES))
        },
        Some(Outcome::Results(results)) => filter_results_view(results, dates),
    }
}

fn filter_results_view(results: &FilterResults, dates: DateSelection) -> Markup {
    let partition = &results.partition;

    html! {
        (date_range_view(results.date_bounds, dates))
        (amount_picker_view(&results.available_amounts, &results.amounts))

        section id="filtered-transactions" class="space-y-3"
        {
            h2 class="text-xl font-semibold" { "Filtered Transactions" }

            @if partition.filtered.is_empty()
            {
                (notice(NO_TRANSACTIONS))
            }
            @else
            {
                (summary_view(&partition.filtered_summary))
                (table_view(&partition.filtered))
            }

            (download_button(endpoints::EXPORT_FILTERED, "Download Filtered Transactions"))
        }

        section id="other-transactions" class="space-y-3"
        {
            h2 class="text-xl font-semibold" { "Other Transactions by the Same Senders" }

            @if partition.other.is_empty()
            {
                (notice(NO_OTHER_TRANSACTIONS))
            }
            @else
            {
                (summary_view(&partition.other_summary))
                (table_view(&partition.other))
                (download_button(endpoints::EXPORT_OTHER, "Download Other Transactions"))
            }
        }
    }
}

fn notice(message: &str) -> Markup {
    html! {
        p class="notice p-4 text-sm rounded-lg text-blue-800 bg-blue-50 dark:bg-gray-800 dark:text-blue-400"
        {
            (message)
        }
    }
}

fn date_range_view(bounds: DateRange, dates: DateSelection) -> Markup {
    let dates = dates.or_bounds(bounds);
    let min = bounds.start.to_string();
    let max = bounds.end.to_string();

    html! {
        div class="grid gap-4 md:grid-cols-2"
        {
            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "From" }

                input
                    id="start_date"
                    type="date"
                    name="start_date"
                    min=(min)
                    max=(max)
                    value=[dates.start.map(|date| date.to_string())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "To" }

                input
                    id="end_date"
                    type="date"
                    name="end_date"
                    min=(min)
                    max=(max)
                    value=[dates.end.map(|date| date.to_string())]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn amount_picker_view(available: &[f64], selection: &AmountSelection) -> Markup {
    html! {
        fieldset
        {
            legend class=(FORM_LABEL_STYLE)
            {
                "Amounts (leave all unchecked to include every amount)"
            }

            div class=(FORM_CHECKBOX_GROUP_STYLE)
            {
                @for (index, amount) in available.iter().enumerate()
                {
                    @let id = format!("amount-{index}");

                    div
                    {
                        input
                            id=(id)
                            type="checkbox"
                            name="amounts"
                            value=(amount.to_string())
                            checked[selection.is_selected(*amount)]
                            class=(FORM_CHECKBOX_INPUT_STYLE);

                        label for=(id) class=(FORM_CHECKBOX_LABEL_STYLE)
                        {
                            (format_amount(Some(*amount)))
                        }
                    }
                }
            }
        }
    }
}

fn summary_view(summary: &Summary) -> Markup {
    html! {
        dl class="summary grid grid-cols-3 gap-4 text-center"
        {
            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Transactions" }
                dd class="text-lg font-semibold" { (format_count(summary.count)) }
            }

            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Total" }
                dd class="text-lg font-semibold" { (format_amount(summary.total)) }
            }

            div
            {
                dt class="text-sm text-gray-500 dark:text-gray-400" { "Average" }
                dd class="text-lg font-semibold" { (format_amount(summary.average)) }
            }
        }
    }
}

fn table_view(rows: &[TransactionRow]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sendername" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Message" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Transday" }
                    }
                }

                tbody
                {
                    @for row in rows
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE) { (row.sender_name) }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                @if let Some(amount) = row.amount
                                {
                                    (format_amount(Some(amount)))
                                }
                            }
                            td class=(TABLE_CELL_STYLE) { (row.message.as_deref().unwrap_or_default()) }
                            td class=(TABLE_CELL_STYLE) { (row.transaction_day.to_string()) }
                        }
                    }
                }
            }
        }
    }
}

fn download_button(endpoint: &str, text: &str) -> Markup {
    html! {
        button
            type="submit"
            formaction=(endpoint)
            formmethod="post"
            formenctype="multipart/form-data"
            class=(BUTTON_SECONDARY_STYLE)
        {
            (text)
        }
    }
}

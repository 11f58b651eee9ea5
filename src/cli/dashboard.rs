use super::ui;
use crate::core::change::percent_change;
use crate::core::{
    AssetQuote, HistoryPoint, MarketDataClient, MarketDataSource, NewsItem, QueryDate, QuoteBatch,
};
use comfy_table::Cell;

/// Renders one quote section. Fallback data is flagged under the title.
pub fn render_quotes(title: &str, batch: &QuoteBatch) -> String {
    let mut output = format!("{}\n", ui::style_text(title, ui::StyleType::Title));
    if batch.is_fallback() {
        output.push_str(&ui::style_text(
            "Backend unavailable, showing offline data",
            ui::StyleType::Error,
        ));
        output.push('\n');
    }

    if batch.quotes.is_empty() {
        output.push_str(&ui::style_text("No quotes available", ui::StyleType::Subtle));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
        ui::header_cell("Price"),
        ui::header_cell("Change"),
        ui::header_cell("Date"),
        ui::header_cell("Volume"),
    ]);
    for quote in &batch.quotes {
        table.add_row(quote_row(quote));
    }
    output.push_str(&table.to_string());
    output
}

fn quote_row(quote: &AssetQuote) -> Vec<Cell> {
    vec![
        Cell::new(&quote.symbol),
        Cell::new(&quote.name),
        ui::price_cell(quote.price),
        ui::change_cell(quote.change_percent),
        Cell::new(quote.date.format("%Y-%m-%d")),
        ui::format_optional_cell(quote.volume, |v| v.to_string()),
    ]
}

pub fn render_news(items: &[NewsItem]) -> String {
    let mut output = format!("{}\n", ui::style_text("Financial News", ui::StyleType::Title));
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Headline"),
        ui::header_cell("Source"),
        ui::header_cell("Published"),
        ui::header_cell("Category"),
    ]);
    for item in items {
        table.add_row(vec![
            Cell::new(format!(
                "{}\n{}",
                item.headline,
                ui::style_text(&item.summary, ui::StyleType::Subtle)
            )),
            Cell::new(&item.source),
            Cell::new(&item.published_at),
            Cell::new(&item.category),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

pub fn render_history(symbol: &str, days: u32, points: &[HistoryPoint]) -> String {
    let mut output = format!(
        "{}\n",
        ui::style_text(&format!("{symbol} ({days} days)"), ui::StyleType::Title)
    );

    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        output.push_str(&ui::style_text("No history available", ui::StyleType::Subtle));
        return output;
    };

    let prices: Vec<_> = points.iter().map(|p| p.price).collect();
    output.push_str(&format!(
        "{}  {:.2} -> {:.2} ({})\n",
        ui::sparkline(&prices),
        first.price,
        last.price,
        ui::signed_percent(percent_change(last.price, first.price))
    ));

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Date"), ui::header_cell("Price")]);
    for point in points {
        table.add_row(vec![
            Cell::new(point.date.format("%Y-%m-%d")),
            ui::price_cell(point.price),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

pub async fn show_indices<S: MarketDataSource>(client: &MarketDataClient<S>, date: QueryDate) {
    let pb = ui::new_spinner("Fetching market indices...");
    let batch = client.market_indices(date).await;
    pb.finish_and_clear();
    println!("{}", render_quotes("Market Overview", &batch));
}

pub async fn show_stocks<S: MarketDataSource>(client: &MarketDataClient<S>, date: QueryDate) {
    let pb = ui::new_spinner("Fetching popular stocks...");
    let batch = client.popular_stocks(date).await;
    pb.finish_and_clear();
    println!("{}", render_quotes("Popular Stocks", &batch));
}

pub async fn show_news<S: MarketDataSource>(client: &MarketDataClient<S>, date: QueryDate) {
    let items = client.get_financial_news(date).await;
    println!("{}", render_news(&items));
}

pub async fn show_history<S: MarketDataSource>(client: &MarketDataClient<S>, symbol: &str, days: u32) {
    let pb = ui::new_spinner(&format!("Fetching history for {symbol}..."));
    let points = client.get_stock_history(symbol, days).await;
    pb.finish_and_clear();
    println!("{}", render_history(symbol, days, &points));
}

/// Market overview, popular stocks and news, in dashboard order.
pub async fn show_dashboard<S: MarketDataSource>(client: &MarketDataClient<S>, date: QueryDate) {
    show_indices(client, date).await;
    ui::print_separator();
    show_stocks(client, date).await;
    ui::print_separator();
    show_news(client, date).await;
}

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::{Line, Span};
use tui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
    Tabs, Wrap,
};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::state::app_state::{InputField, TextInput};
use crate::state::fetch::FetchState;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use courtside_api::games::integrity_warnings;
use courtside_api::lookup::{format_delta, format_value};
use courtside_api::odds::{OddsSource, Sportsbook, format_side, format_total};
use courtside_api::params::AVAILABLE_SEASONS;
use courtside_api::regression::{FEATURES, TARGETS};
use courtside_api::series::{current_value, league_segments, value_bounds};
use courtside_api::summary::{BettingSummary, BettingTrend, Record};
use courtside_api::{GameRow, StatKey};
use log::error;

static TABS: &[&str; 5] = &["League", "Team", "Lookup", "Schedule", "Regression"];

const TEAM_COLOR: Color = Color::Cyan;
const LEAGUE_COLOR: Color = Color::Gray;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::League => draw_league(f, layout.main, app),
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Lookup => draw_lookup(f, layout.main, app),
            MenuItem::Schedule => draw_schedule(f, layout.main, app),
            MenuItem::Regression => draw_regression(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(area) = layout.logs {
            draw_logs(f, area);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::League => 0,
        MenuItem::Team => 1,
        MenuItem::Lookup => 2,
        MenuItem::Schedule => 3,
        MenuItem::Regression => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = match app.state.last_error.as_deref() {
        Some(_) => Paragraph::new(Line::styled("no roster  ? ", Style::default().fg(Color::Red))),
        None => Paragraph::new("Help: ? "),
    };
    let help = help
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Shared pieces
// ---------------------------------------------------------------------------

/// Render the placeholder for any non-success state and return the data
/// only when there is something to draw.
fn ready<'s, T>(f: &mut Frame, area: Rect, state: &'s FetchState<T>, empty: &str) -> Option<&'s T> {
    let (msg, color) = match state {
        FetchState::Success(value) => return Some(value),
        FetchState::Idle => ("Waiting for a selection".to_string(), Color::DarkGray),
        FetchState::Loading => ("Loading...".to_string(), Color::DarkGray),
        FetchState::Empty => (empty.to_string(), Color::DarkGray),
        FetchState::Error(message) => (format!("Failed to load: {message}"), Color::Red),
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
    None
}

fn pills<'a>(options: &[StatKey], selected: StatKey) -> Line<'a> {
    let mut spans = Vec::with_capacity(options.len() * 2);
    for stat in options {
        let style = if *stat == selected {
            Style::default().fg(Color::Black).bg(TEAM_COLOR)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", stat.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn season_line<'a>(selected: u16) -> Line<'a> {
    let mut spans = vec![Span::styled("Season ", Style::default().fg(Color::DarkGray))];
    for season in AVAILABLE_SEASONS {
        let style = if season == selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {season} "), style));
    }
    Line::from(spans)
}

fn input_line<'a>(label: &'a str, input: &TextInput, editing: bool) -> Line<'a> {
    let (value, style) = if editing {
        (format!("{}▏", input.as_str()), Style::default().fg(Color::Yellow))
    } else {
        (input.as_str().to_owned(), Style::default().fg(Color::White))
    };
    Line::from(vec![Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)), Span::styled(value, style)])
}

/// Suggestions under a team search that does not resolve yet.
fn search_hint<'a>(app: &App, field: InputField) -> Line<'a> {
    let text = app.state.input(field).as_str();
    if !app.state.is_editing(field) || text.is_empty() || app.state.roster.resolve(text).is_some() {
        return Line::default();
    }
    let matches = app.state.roster.suggestions(text, 5);
    let hint = if matches.is_empty() { "no team matches".to_owned() } else { matches.join(" · ") };
    Line::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray))
}

fn date_label(date: Option<chrono::NaiveDate>) -> String {
    date.map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string())
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

fn draw_league(f: &mut Frame, area: Rect, app: &App) {
    let league = &app.state.league;
    let block = default_border(Color::White).title(" League Trends ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, stats, card, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(3), Constraint::Fill(1)])
            .areas(inner);

    let mut header_line = season_line(league.season);
    header_line.push_span(Span::styled("   h/l=stat  s=season", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(header_line), header);
    f.render_widget(Paragraph::new(pills(&StatKey::ALL, league.stat)), stats);

    let Some(series) = ready(f, chart_area, league.series.state(), "No league data for this season") else {
        return;
    };

    let current = format_value(current_value(series));
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Current league average ", Style::default().fg(Color::DarkGray)),
            Span::styled(current, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(format!("  ({} days)", series.len()), Style::default().fg(Color::DarkGray)),
        ]))
        .block(default_border(Color::DarkGray).title(format!(" {} ", league.stat.label()))),
        card,
    );

    let points: Vec<(f64, f64)> = series.iter().enumerate().map(|(i, p)| (i as f64, p.value)).collect();
    let Some((lo, hi)) = value_bounds(series.iter().map(|p| p.value)) else {
        return;
    };
    let first = series.first().map(|p| p.date);
    let last = series.last().map(|p| p.date);

    let datasets = vec![
        Dataset::default()
            .name("League")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(LEAGUE_COLOR))
            .data(&points),
    ];
    let chart = Chart::new(datasets)
        .block(default_border(Color::DarkGray))
        .x_axis(
            Axis::default()
                .bounds([0.0, (points.len().max(2) - 1) as f64])
                .labels(vec![date_label(first), date_label(last)])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![format!("{lo:.3}"), format!("{hi:.3}")])
                .style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(chart, chart_area);
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let title = match app.state.roster.name_of(&team.team_id) {
        Some(name) => format!(" {name} "),
        None => format!(" {} ", team.team_id),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [controls, h2h, middle, vegas, log] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .areas(inner);

    draw_team_controls(f, controls, app);
    draw_h2h_bar(f, h2h, app);

    let [trend, profile] = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).areas(middle);
    draw_trend_chart(f, trend, app);
    draw_style_profile(f, profile, app);

    draw_vegas_tracker(f, vegas, app);
    draw_game_log(f, log, app);
}

fn draw_team_controls(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let mut lines = vec![
        input_line("Team", &team.search, app.state.is_editing(InputField::TeamSearch)),
        search_hint(app, InputField::TeamSearch),
        input_line("vs", &team.opponent_search, app.state.is_editing(InputField::OpponentSearch)),
    ];
    if app.state.is_editing(InputField::OpponentSearch) {
        lines[1] = search_hint(app, InputField::OpponentSearch);
    }
    let bottom = if team.is_comparing() {
        Line::styled("All seasons  x=clear opponent", Style::default().fg(Color::DarkGray))
    } else {
        season_line(team.season)
    };
    lines.push(bottom);
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_h2h_bar(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(rows) = ready(f, inner, team.games.state(), "No games available yet") else {
        return;
    };
    let record = Record::from_rows(rows);
    let scope = match team.opponent_id.as_deref() {
        Some(id) => format!("vs {} (all seasons)", app.state.roster.name_or_unknown(id)),
        None => format!("{} season", team.season),
    };
    let margin_color = if record.avg_margin >= 0.0 { Color::Green } else { Color::Red };

    let mut spans = vec![
        Span::styled(scope, Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(record.display(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!("  win {:.0}%", record.win_rate() * 100.0), Style::default().fg(Color::Gray)),
        Span::styled("  avg margin ", Style::default().fg(Color::DarkGray)),
        Span::styled(record.margin_display(), Style::default().fg(margin_color)),
    ];
    let warnings = integrity_warnings(rows);
    if !warnings.is_empty() {
        spans.push(Span::styled(
            format!("  ⚠ {} score mismatch(es)", warnings.len()),
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let block = default_border(Color::DarkGray).title(" Team vs League ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [pill_area, chart_area] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(Paragraph::new(pills(&StatKey::TREND, team.trend_stat)), pill_area);

    let Some(points) = ready(f, chart_area, team.series.state(), "No daily stats for this season") else {
        return;
    };

    let team_points: Vec<(f64, f64)> = points.iter().enumerate().map(|(i, p)| (i as f64, p.team_value)).collect();
    // Missing league days are gaps, so each run is its own dataset.
    let segments = league_segments(points);
    let values = points.iter().flat_map(|p| std::iter::once(p.team_value).chain(p.league_value));
    let Some((lo, hi)) = value_bounds(values) else {
        return;
    };

    let mut datasets = vec![
        Dataset::default()
            .name(team_label(app))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(TEAM_COLOR))
            .data(&team_points),
    ];
    for (i, segment) in segments.iter().enumerate() {
        let mut dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(LEAGUE_COLOR))
            .data(segment);
        if i == 0 {
            dataset = dataset.name("League");
        }
        datasets.push(dataset);
    }

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .bounds([0.0, (team_points.len().max(2) - 1) as f64])
                .labels(vec![
                    date_label(points.first().map(|p| p.date)),
                    date_label(points.last().map(|p| p.date)),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![format!("{lo:.3}"), format!("{hi:.3}")])
                .style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(chart, chart_area);
}

fn team_label(app: &App) -> String {
    app.state.roster.name_of(&app.state.team.team_id).unwrap_or("Team").to_owned()
}

fn draw_style_profile(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Style Profile ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(profile) = ready(f, inner, app.state.team.profile.state(), "No season averages") else {
        return;
    };

    // Bars are drawn against each axis' reference level; labels keep the raw value.
    let scaled = |value: f64, full: f64| ((value / full) * 100.0).clamp(0.0, 100.0).round() as u64;
    let mut chart = BarChart::default()
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1)
        .max(100);
    for p in profile {
        let team = Bar::default()
            .value(scaled(p.team, p.axis.full_mark))
            .text_value(format!("{:.1}", p.team))
            .style(Style::default().fg(TEAM_COLOR));
        let league = Bar::default()
            .value(scaled(p.league, p.axis.full_mark))
            .text_value(format!("{:.1}", p.league))
            .style(Style::default().fg(LEAGUE_COLOR));
        chart = chart.data(BarGroup::default().label(Line::from(p.axis.label)).bars(&[team, league]));
    }
    f.render_widget(chart, inner);
}

fn draw_vegas_tracker(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray).title(" Vegas Tracker ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(rows) = ready(f, inner, app.state.team.games.state(), "No games available yet") else {
        return;
    };
    let summary = BettingSummary::from_rows(rows);
    let Some(trend) = summary.trend() else {
        f.render_widget(
            Paragraph::new("No betting data available")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };
    let trend_color = match trend {
        BettingTrend::Over => Color::Green,
        BettingTrend::Under => Color::Red,
        BettingTrend::Balanced => Color::Yellow,
    };

    let line = Line::from(vec![
        Span::styled("O/U ", Style::default().fg(Color::DarkGray)),
        Span::styled(summary.display(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(
                "  over {:.1}%  under {:.1}%  push {:.1}%  ",
                summary.over_pct(),
                summary.under_pct(),
                summary.push_pct()
            ),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(trend.label(), Style::default().fg(trend_color)),
        Span::styled(
            format!(
                "  beat model {:.1}% ({}/{})",
                summary.beat_prediction_rate() * 100.0,
                summary.beat_prediction,
                summary.total_games
            ),
            Style::default().fg(Color::Gray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), inner);
}

fn draw_game_log(f: &mut Frame, area: Rect, app: &App) {
    let team = &app.state.team;
    let block = default_border(Color::DarkGray).title(" Game Log ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(rows) = ready(f, inner, team.games.state(), "No games found") else {
        return;
    };

    let header = Row::new(
        GAME_LOG_COLUMNS
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(TEAM_COLOR).add_modifier(Modifier::BOLD))),
    );
    let body = rows.iter().skip(team.game_scroll).map(game_row);

    let table = Table::new(
        body,
        [
            Constraint::Length(10),
            Constraint::Fill(1),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
        ],
    )
    .header(header);
    f.render_widget(table, inner);
}

const GAME_LOG_COLUMNS: [&str; 14] = [
    "Date", "Opponent", "", "Score", "1H", "2H", "OT", "Open", "Close", "Total", "KP", "Pred", "Poss", "Win%",
];

/// Cell text for one game, in `GAME_LOG_COLUMNS` order.
fn game_cells(g: &GameRow) -> [String; 14] {
    let period = |team: Option<u16>, opp: Option<u16>| match (team, opp) {
        (Some(t), Some(o)) => format!("{t}-{o}"),
        _ => "-".to_owned(),
    };
    let team_box = g.team_box;
    let opp_box = g.opp_box;
    let ot = if g.has_ot {
        period(team_box.map(|b| b.ot.unwrap_or(0)), opp_box.map(|b| b.ot.unwrap_or(0)))
    } else {
        String::new()
    };
    let num = |v: Option<f64>| v.map_or_else(|| "-".to_owned(), |v| format!("{v:.1}"));

    [
        date_label(g.game_date),
        g.opponent_name.clone(),
        g.home_away.label().to_owned(),
        format!("{} {}", if g.is_win() { "W" } else { "L" }, g.actual_score()),
        period(team_box.map(|b| b.h1), opp_box.map(|b| b.h1)),
        period(team_box.map(|b| b.h2), opp_box.map(|b| b.h2)),
        ot,
        num(g.open_total),
        num(g.close_total),
        num(g.game_total),
        num(g.kp_total),
        num(g.predicted_score),
        num(g.predicted_possessions),
        g.win_probability_pct().map_or_else(|| "-".to_owned(), |p| format!("{p:.0}")),
    ]
}

fn game_row(g: &GameRow) -> Row<'static> {
    let result_color = if g.is_win() { Color::Green } else { Color::Red };
    Row::new(game_cells(g).into_iter().enumerate().map(move |(i, text)| match i {
        2 => Cell::from(text).style(Style::default().fg(Color::DarkGray)),
        3 => Cell::from(text).style(Style::default().fg(result_color)),
        _ => Cell::from(text),
    }))
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

fn draw_lookup(f: &mut Frame, area: Rect, app: &App) {
    let lookup = &app.state.lookup;
    let block = default_border(Color::White).title(" Daily Lookup ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [controls, stats, cards, _rest] =
        Layout::vertical([Constraint::Length(4), Constraint::Length(1), Constraint::Length(5), Constraint::Fill(1)])
            .areas(inner);

    let date_valid = lookup.date_input.as_date().is_some();
    let mut date_line = input_line("Date", &lookup.date_input, app.state.is_editing(InputField::LookupDate));
    if !date_valid {
        date_line.push_span(Span::styled("  (YYYY-MM-DD)", Style::default().fg(Color::Red)));
    }
    f.render_widget(
        Paragraph::new(vec![
            input_line("Team", &lookup.search, app.state.is_editing(InputField::LookupTeam)),
            search_hint(app, InputField::LookupTeam),
            date_line,
            Line::styled("/=team  d=date  h/l=stat", Style::default().fg(Color::DarkGray)),
        ]),
        controls,
    );
    f.render_widget(Paragraph::new(pills(&StatKey::LOOKUP, lookup.stat)), stats);

    let Some(cmp) = ready(f, cards, lookup.result.state(), "No data for this team on this date") else {
        return;
    };

    let [team_card, league_card, delta_card] =
        Layout::horizontal([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)]).areas(cards);
    let card = |title: &str, value: String, color: Color| {
        Paragraph::new(value)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(default_border(Color::DarkGray).title(format!(" {title} ")))
    };
    let delta_color = match cmp.delta() {
        Some(_) if cmp.is_favorable() => Color::Green,
        Some(d) if d < 0.0 => Color::Red,
        _ => Color::Gray,
    };
    f.render_widget(card("Team", format_value(cmp.team_value), TEAM_COLOR), team_card);
    f.render_widget(card("League", format_value(cmp.league_value), LEAGUE_COLOR), league_card);
    f.render_widget(card("Δ vs League", format_delta(cmp.delta()), delta_color), delta_card);
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn draw_schedule(f: &mut Frame, area: Rect, app: &App) {
    let schedule = &app.state.schedule;
    let block = default_border(Color::White).title(" Schedule ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [controls, books, note, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(inner);

    let mut date_line = input_line("Date", &schedule.date_input, app.state.is_editing(InputField::ScheduleDate));
    date_line.push_span(Span::styled("   d=date  h/l=book  j/k=select", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(date_line), controls);

    let book_spans: Vec<Span> = Sportsbook::ALL
        .iter()
        .flat_map(|b| {
            let style = if *b == schedule.book {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", b.label()), style), Span::raw(" ")]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(book_spans)), books);

    if schedule.book != schedule.source.book {
        f.render_widget(
            Paragraph::new(format!("No lines from {} yet", schedule.book.label()))
                .style(Style::default().fg(Color::DarkGray)),
            note,
        );
    }

    let Some(entries) = ready(f, content, schedule.entries.state(), "No games scheduled") else {
        return;
    };

    let header = Row::new(
        ["Matchup", "Location", "Pick", "Pred", "Poss", "O/U Open", "O/U Close", "Side Open", "Side Close"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(TEAM_COLOR).add_modifier(Modifier::BOLD))),
    );
    let rows = entries.iter().enumerate().map(|(i, e)| {
        let lines = schedule.source.lines(e, schedule.book).unwrap_or_default();
        let matchup = match e.home_team_id.as_deref() {
            Some(home) if home == e.team1.id => format!("{} @ {}", e.team2.name, e.team1.name),
            Some(home) if home == e.team2.id => format!("{} @ {}", e.team1.name, e.team2.name),
            _ => format!("{} vs {}", e.team1.name, e.team2.name),
        };
        let style = if i == schedule.selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(matchup),
            Cell::from(e.location.clone().unwrap_or_else(|| "-".to_owned())),
            Cell::from(e.predicted_winner.clone().unwrap_or_else(|| "-".to_owned())),
            Cell::from(e.predicted_score.clone().unwrap_or_else(|| "-".to_owned())),
            Cell::from(format_total(e.predicted_possessions)),
            Cell::from(format_total(lines.open_total)),
            Cell::from(format_total(lines.close_total)),
            Cell::from(format_side(lines.side_open)),
            Cell::from(format_side(lines.side_close)),
        ])
        .style(style)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(11),
        ],
    )
    .header(header);
    f.render_widget(table, content);
}

// ---------------------------------------------------------------------------
// Regression
// ---------------------------------------------------------------------------

fn draw_regression(f: &mut Frame, area: Rect, app: &App) {
    let regression = &app.state.regression;
    let block = default_border(Color::White).title(" Regression ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        input_line("Team", &regression.search, app.state.is_editing(InputField::RegressionTeam)),
        Line::default(),
        Line::styled("Features (space=toggle)", Style::default().fg(Color::DarkGray)),
    ];
    for (i, feature) in FEATURES.iter().enumerate() {
        let mark = if regression.setup.is_selected(*feature) { "[x]" } else { "[ ]" };
        let style = if i == regression.cursor {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("  {mark} {feature}"), style));
    }
    lines.push(Line::default());

    let mut target = vec![Span::styled("Target (t=cycle) ", Style::default().fg(Color::DarkGray))];
    for t in TARGETS {
        let style = if t == regression.setup.target {
            Style::default().fg(Color::Black).bg(TEAM_COLOR)
        } else {
            Style::default().fg(Color::Gray)
        };
        target.push(Span::styled(format!(" {t} "), style));
    }
    lines.push(Line::from(target));
    lines.push(Line::default());
    lines.push(Line::styled("Enter=run", Style::default().fg(Color::DarkGray)));
    if let Some(status) = regression.status.as_deref() {
        lines.push(Line::styled(status.to_owned(), Style::default().fg(Color::White)));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let text = "\
Tabs      1=League  2=Team  3=Lookup  4=Schedule  5=Regression  ?=help  Esc=back
Global    q=quit  f=full screen  \"=logs
Editing   type to search, Backspace, Enter/Esc=done

League    h/l=stat  s=season
Team      /=team  o=opponent  x=clear opponent  h/l=stat  s/S=season  j/k=scroll log
Lookup    /=team  d=date  h/l=stat
Schedule  d=date  h/l=book  j/k=select
Regression  /=team  j/k=feature  space=toggle  t=target  Enter=run";
    f.render_widget(
        Paragraph::new(text).block(default_border(Color::White).title(" Help ")),
        area,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};
use walangpasok_core::{
    model::{IconKind, Status, WeatherReading},
    refresh::Widget,
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new("walangpasok · class suspensions and weather for Philippine cities")
        .block(Block::default().borders(Borders::ALL).title("Walang Pasok"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::CitySelect => draw_city_select(frame, app, *content_area),
        Screen::CityStatus => draw_city_status(frame, app, *content_area),
        Screen::News => draw_news(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::CitySelect => "↑/↓ move · Enter/Space select city · q/Ctrl-C quit",
        Screen::CityStatus => "r refresh · n news · Esc/← back to cities · q/Ctrl-C quit",
        Screen::News => "r refresh · Esc/←/n back to status · q/Ctrl-C quit",
    };

    let any_loading = !app.loading.is_empty();
    let status_text = if any_loading {
        format!("Loading… · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };
    let status_style = if any_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_city_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .cities
        .iter()
        .enumerate()
        .map(|(idx, meta)| {
            let prefix = if idx == app.city_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{}", meta.name))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select city (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.cities.is_empty() {
        state.select(Some(app.city_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_city_status(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // weather
            Constraint::Min(0),    // announcements
            Constraint::Length(5), // contacts
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [weather_area, announcements_area, contacts_area] = chunks else {
        return;
    };

    draw_weather(frame, app, *weather_area);
    draw_announcements(frame, app, *announcements_area);
    draw_contacts(frame, app, *contacts_area);
}

fn draw_weather(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "Weather in {} ({})",
        app.selected_city_name(),
        app.updated_label(Widget::Weather)
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    let paragraph = match &app.weather {
        Some(reading) => Paragraph::new(weather_lines(reading)),
        None if app.is_loading(Widget::Weather) => Paragraph::new("Getting weather data…"),
        None => Paragraph::new("Weather unavailable · press r to try again")
            .style(Style::default().fg(Color::Red)),
    };

    frame.render_widget(paragraph.block(block).wrap(Wrap { trim: true }), area);
}

fn weather_lines(reading: &WeatherReading) -> Vec<Line<'static>> {
    vec![
        Line::from(format!(
            "{} {}°C · {}",
            icon_label(reading.icon),
            reading.temperature,
            reading.condition
        ))
        .style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from(format!(
            "Rain {}mm/h · Wind {}km/h · Humidity {}%",
            reading.rainfall, reading.wind_speed, reading.humidity
        )),
        Line::from(format!(
            "Pressure {}hPa · Visibility {} · Clouds {}%",
            reading.pressure,
            reading
                .visibility
                .map_or_else(|| String::from("n/a"), |km| format!("{km}km")),
            reading.cloudiness
        )),
    ]
}

fn draw_announcements(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "Announcements for {} ({})",
        app.selected_city_name(),
        app.updated_label(Widget::Announcements)
    );

    if app.announcements.is_empty() {
        let text = if app.is_loading(Widget::Announcements) {
            format!("Getting latest updates for {}…", app.selected_city_name())
        } else {
            String::from("No announcements right now. Press r to check again.")
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    // Records arrive sorted newest first.
    let rows = app.announcements.iter().map(|record| {
        let date = record
            .date
            .with_timezone(&chrono::Local)
            .format("%d %b %H:%M")
            .to_string();
        let status = match record.status {
            Status::Suspended => "SUSPENDED",
            Status::Normal => "normal",
        };
        let source = if record.verified {
            format!("✓ {}", record.source)
        } else {
            record.source.clone()
        };

        Row::new(vec![
            Cell::from(date),
            Cell::from(status),
            Cell::from(source),
            Cell::from(record.reason.clone()),
        ])
        .style(Style::default().fg(status_color(record.status)))
    });

    let column_widths = [
        Constraint::Length(13),
        Constraint::Length(10),
        Constraint::Length(28),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Date", "Status", "Source", "Reason"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_contacts(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = app.contacts.as_ref().map_or_else(Vec::new, |contacts| {
        vec![
            Line::from(format!(
                "{}: {}",
                contacts.deped_office, contacts.deped_phone
            )),
            Line::from(format!(
                "{}: {}",
                contacts.mayor_office, contacts.mayor_phone
            )),
            Line::from(format!("Emergency: {}", contacts.emergency)),
        ]
    });

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Contacts"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_news(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        "Latest news for {} ({})",
        app.selected_city_name(),
        app.updated_label(Widget::News)
    );

    let items = if app.news.is_empty() {
        let text = if app.is_loading(Widget::News) {
            "Loading news…"
        } else {
            "No recent news about suspensions."
        };
        vec![ListItem::new(text)]
    } else {
        app.news
            .iter()
            .map(|article| {
                let published = article
                    .published_at
                    .with_timezone(&chrono::Local)
                    .format("%d %b %H:%M");
                ListItem::new(vec![
                    Line::from(article.title.clone())
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                    Line::from(format!("{published} · {} · {}", article.source, article.url))
                        .style(Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect()
    };

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Suspended => Color::Red,
        Status::Normal => Color::Green,
    }
}

fn icon_label(icon: IconKind) -> &'static str {
    match icon {
        IconKind::Clear => "☀",
        IconKind::Cloud => "☁",
        IconKind::Rain => "🌧",
        IconKind::Drizzle => "🌦",
        IconKind::Thunderstorm => "⛈",
        IconKind::Snow => "❄",
    }
}

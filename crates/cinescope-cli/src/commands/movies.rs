use super::spinner::RequestSpinner;
use super::AppContext;
use crate::output::Output;
use crate::MovieCommands;
use cinescope_api::MovieCatalog;
use cinescope_config::ImageConfig;
use cinescope_core::{discover, pick_featured, DiscoverOptions, FeaturedMovie, NO_FEATURED_MESSAGE};
use cinescope_models::{image_url, MovieSummary, MISSING_IMAGE_TEXT};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_movies(cmd: MovieCommands, api_url: Option<&str>, output: &Output) -> Result<()> {
    let ctx = AppContext::load(api_url)?;
    let client = ctx.client()?;

    let (heading, movies) = match cmd {
        MovieCommands::Popular => {
            let spinner = RequestSpinner::start("Fetching popular movies...");
            let movies = client.popular_movies().await;
            spinner.finish();
            ("Popular Movies".to_string(), movies)
        }
        MovieCommands::Featured => return run_featured(&client, &ctx.config.images, output).await,
        MovieCommands::Discover { genre, year } => {
            let options = DiscoverOptions::from_config(&ctx.config.discover);
            let filter = options
                .build_filter(genre.as_deref(), year)
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

            let spinner = RequestSpinner::start("Discovering movies...");
            let movies = discover(&client, &filter).await;
            spinner.finish();

            let heading = match (&filter.genre, filter.year) {
                (Some(g), Some(y)) => format!("Discover: {} ({})", g, y),
                (Some(g), None) => format!("Discover: {}", g),
                (None, Some(y)) => format!("Discover: {}", y),
                (None, None) => "Discover".to_string(),
            };
            (heading, movies)
        }
    };

    let movies = movies.map_err(|e| {
        output.error(format!("Failed to load movies: {}", e));
        color_eyre::eyre::eyre!("Movie request failed")
    })?;

    if output.is_human() {
        if movies.is_empty() {
            output.info("No movies found");
        } else {
            output.println(heading);
            output.println(movie_table(&movies, &ctx.config.images).to_string());
        }
    } else {
        let entries: Vec<_> = movies
            .iter()
            .map(|m| {
                json!({
                    "id": m.id,
                    "title": m.title,
                    "card_title": m.card_title(),
                    "year": m.release_year(),
                    "rating": m.vote_average,
                    "poster_url": image_url(&ctx.config.images.base_url, ctx.config.images.grid_size, m.poster_path.as_deref()),
                })
            })
            .collect();
        output.json(&json!(entries));
    }

    Ok(())
}

async fn run_featured(catalog: &dyn MovieCatalog, images: &ImageConfig, output: &Output) -> Result<()> {
    let spinner = RequestSpinner::start("Picking a featured movie...");
    let featured = pick_featured(catalog, images).await;
    spinner.finish();

    let featured = featured.map_err(|e| {
        output.error(format!("Failed to load movies: {}", e));
        color_eyre::eyre::eyre!("Movie request failed")
    })?;

    match (featured, output.is_human()) {
        (Some(movie), true) => {
            output.println(format!("{}", movie.title.bold().bright_cyan()));
            output.println(featured_table(&movie).to_string());
        }
        (Some(movie), false) => output.json(&serde_json::to_value(&movie)?),
        (None, true) => output.info(NO_FEATURED_MESSAGE),
        (None, false) => output.json(&json!({ "featured": null, "message": NO_FEATURED_MESSAGE })),
    }
    Ok(())
}

fn featured_table(movie: &FeaturedMovie) -> Table {
    let mut table = Table::new();
    let year = movie.year.map(|y| y.to_string()).unwrap_or_default();
    let rating = movie.rating.map(|v| format!("{:.1}", v)).unwrap_or_default();

    table.add_row(vec![Cell::new("Year").add_attribute(Attribute::Bold), Cell::new(year)]);
    table.add_row(vec![Cell::new("Rating").add_attribute(Attribute::Bold), Cell::new(rating)]);
    if let Some(overview) = &movie.overview {
        table.add_row(vec![Cell::new("Overview").add_attribute(Attribute::Bold), Cell::new(overview)]);
    }
    table.add_row(vec![
        Cell::new("Backdrop").add_attribute(Attribute::Bold),
        Cell::new(&movie.backdrop_url),
    ]);

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn movie_table(movies: &[MovieSummary], images: &ImageConfig) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Title").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Poster").add_attribute(Attribute::Bold),
    ]);

    for movie in movies {
        let year = movie.release_year().map(|y| y.to_string()).unwrap_or_default();
        let rating = movie.vote_average.map(|v| format!("{:.1}", v)).unwrap_or_default();
        let poster = match image_url(&images.base_url, images.grid_size, movie.poster_path.as_deref()) {
            Some(url) => Cell::new(url),
            None => Cell::new(MISSING_IMAGE_TEXT).fg(Color::DarkGrey),
        };
        table.add_row(vec![Cell::new(movie.card_title()), Cell::new(year), Cell::new(rating), poster]);
    }

    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

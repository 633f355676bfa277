use chrono::NaiveDate;

use crate::{
    error::AppResult,
    models::{Genre, Item, ItemId, SyntheticPeer, TagId},
    services::catalog::CatalogProvider,
};

/// Built-in sample catalog
///
/// Twelve well-known films, the TMDB genre table and three synthetic peers.
/// Used when no `CATALOG_PATH` is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

#[async_trait::async_trait]
impl CatalogProvider for EmbeddedCatalog {
    async fn load_items(&self) -> AppResult<Vec<Item>> {
        Ok(sample_items())
    }

    async fn load_genres(&self) -> AppResult<Vec<Genre>> {
        Ok(sample_genres())
    }

    async fn load_peers(&self) -> AppResult<Vec<SyntheticPeer>> {
        Ok(reference_peers())
    }

    fn name(&self) -> &'static str {
        "embedded"
    }
}

#[allow(clippy::too_many_arguments)]
fn movie(
    id: ItemId,
    title: &str,
    overview: &str,
    poster: &str,
    backdrop: &str,
    released: (i32, u32, u32),
    rating: f64,
    genres: &[TagId],
    runtime: u32,
) -> Item {
    Item {
        release_date: NaiveDate::from_ymd_opt(released.0, released.1, released.2),
        overview: overview.to_string(),
        poster_ref: Some(poster.to_string()),
        backdrop_ref: Some(backdrop.to_string()),
        runtime_minutes: Some(runtime),
        ..Item::new(id, title, genres.iter().copied(), rating)
    }
}

/// The twelve sample movies, in catalog order
pub fn sample_items() -> Vec<Item> {
    vec![
        movie(
            1,
            "The Matrix",
            "A computer programmer discovers reality isn't what it seems.",
            "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
            (1999, 3, 30),
            8.7,
            &[28, 878],
            136,
        ),
        movie(
            2,
            "Inception",
            "A thief enters people's dreams to steal secrets from their subconscious.",
            "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg",
            "/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg",
            (2010, 7, 15),
            8.8,
            &[28, 878, 53],
            148,
        ),
        movie(
            3,
            "Interstellar",
            "A team of explorers travel through a wormhole in space.",
            "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "/pbrkL804c8yAv3zBZR4QPWZyyAs.jpg",
            (2014, 11, 5),
            8.6,
            &[18, 878],
            169,
        ),
        movie(
            4,
            "Blade Runner 2049",
            "A young blade runner discovers a secret that could plunge society into chaos.",
            "/gajva2L0rPYkEWjzgFlBXCAVBE5.jpg",
            "/ilKBGlhTUUmI5OvQiJGX0tYF8f1.jpg",
            (2017, 10, 4),
            8.0,
            &[878, 18],
            164,
        ),
        movie(
            5,
            "The Dark Knight",
            "Batman faces the Joker in this acclaimed superhero thriller.",
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "/hqkIcbrOHL86UncnHIsHVcVmzue.jpg",
            (2008, 7, 18),
            9.0,
            &[28, 80, 18],
            152,
        ),
        movie(
            6,
            "Pulp Fiction",
            "The lives of two mob hitmen, a boxer, and others intertwine in four tales of violence.",
            "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
            "/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg",
            (1994, 10, 14),
            8.9,
            &[80, 18],
            154,
        ),
        movie(
            7,
            "3 Idiots",
            "Two friends search for their long-lost companion while remembering their college days.",
            "/66A9MqXOyVFCssoloscw4Lao4Dh.jpg",
            "/mMtUybQ6hL24FXo0F3Z4j2KG7kZ.jpg",
            (2009, 12, 25),
            8.4,
            &[35, 18],
            170,
        ),
        movie(
            8,
            "Dangal",
            "Former wrestler Mahavir Singh Phogat trains his daughters to become world-class wrestlers.",
            "/lInS8LPx0qfxlyTpHqyq6sJQp3v.jpg",
            "/ovY4akNigq7J8J0q1eFJwrWe01E.jpg",
            (2016, 12, 23),
            8.3,
            &[18, 10751],
            161,
        ),
        movie(
            9,
            "Zindagi Na Milegi Dobara",
            "Three friends on a bachelor trip across Spain discover themselves and their relationships.",
            "/fC7Gk7ynxgJnwMdLJnXVKhDHH8k.jpg",
            "/8Z8dptJEypuLoOQro1WugD855YE.jpg",
            (2011, 7, 15),
            8.1,
            &[18, 35, 12],
            155,
        ),
        movie(
            10,
            "Lagaan",
            "Villagers accept a challenge from British officers to play cricket and avoid paying taxes.",
            "/7JjZOrsYv5iDHAy5LCk3k4ixRMO.jpg",
            "/w5S9ZOGhwOZjQ56P6N8QfzWfA2g.jpg",
            (2001, 6, 15),
            8.1,
            &[18, 36, 10752],
            224,
        ),
        movie(
            11,
            "Queen",
            "A young woman goes on her honeymoon alone and discovers herself in the process.",
            "/p5ozvmdgsmbWe0H8Xk7Rc8SCwAB.jpg",
            "/iNh3BivHyg5sQRPP1KOkzguEX0H.jpg",
            (2013, 3, 7),
            8.2,
            &[35, 18],
            146,
        ),
        movie(
            12,
            "Sholay",
            "Two criminals are hired by a retired police officer to capture a ruthless dacoit.",
            "/pW6v9dUQOYYwkllKKE7PGhMGfVU.jpg",
            "/l4vxQU7V4Dw9XN1iGzQfYnfK7Kl.jpg",
            (1975, 8, 15),
            8.6,
            &[28, 18, 37],
            204,
        ),
    ]
}

/// TMDB movie genre ids and names
pub fn sample_genres() -> Vec<Genre> {
    [
        (28, "Action"),
        (12, "Adventure"),
        (16, "Animation"),
        (35, "Comedy"),
        (80, "Crime"),
        (99, "Documentary"),
        (18, "Drama"),
        (10751, "Family"),
        (14, "Fantasy"),
        (36, "History"),
        (27, "Horror"),
        (10402, "Music"),
        (9648, "Mystery"),
        (10749, "Romance"),
        (878, "Science Fiction"),
        (10770, "TV Movie"),
        (53, "Thriller"),
        (10752, "War"),
        (37, "Western"),
    ]
    .into_iter()
    .map(|(id, name)| Genre::new(id, name))
    .collect()
}

/// The three hardcoded peer profiles the collaborative strategy simulates with
pub fn reference_peers() -> Vec<SyntheticPeer> {
    vec![
        // Action / sci-fi fan
        SyntheticPeer::new(1, [28, 878, 53], [(1, 9), (2, 8), (3, 7)]),
        // Drama / crime fan
        SyntheticPeer::new(2, [18, 80, 9648], [(5, 9), (6, 8), (1, 6)]),
        // Sci-fi / fantasy fan
        SyntheticPeer::new(3, [878, 14, 12], [(2, 9), (3, 8), (4, 7)]),
    ]
}

//! Wire shapes and read-time joins: movies carry their computed `ratings`
//! array, ratings carry their `movie` resolved into the full object. The
//! store-generated identifier is exposed as a public `id` string.

use crate::models::{Movie, Rating};
use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct MovieBody {
    pub id: String,
    pub title: String,
    pub year: String,
    pub director: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<String>,
}

impl From<Movie> for MovieBody {
    fn from(movie: Movie) -> Self {
        MovieBody {
            id: movie.id.to_hex(),
            title: movie.title,
            year: movie.year,
            director: movie.director,
            duration: movie.duration,
            genre: movie.genre,
            rate: movie.rate,
        }
    }
}

/// A movie plus its derived `ratings` array. Not stored; assembled per read.
#[derive(Debug, Serialize)]
pub struct MovieWithRatings {
    #[serde(flatten)]
    pub movie: MovieBody,
    pub ratings: Vec<RatingBody>,
}

/// Rating as it appears inside a movie's `ratings` array: `movie` stays a
/// bare id to avoid the cyclic shape.
#[derive(Debug, Serialize)]
pub struct RatingBody {
    pub id: String,
    pub movie: String,
    pub text: String,
    pub score: f64,
}

impl From<Rating> for RatingBody {
    fn from(rating: Rating) -> Self {
        RatingBody {
            id: rating.id.to_hex(),
            movie: rating.movie.to_hex(),
            text: rating.text,
            score: rating.score,
        }
    }
}

/// Rating with its `movie` reference resolved into the full movie object.
#[derive(Debug, Serialize)]
pub struct RatingPopulated {
    pub id: String,
    pub movie: Option<MovieBody>,
    pub text: String,
    pub score: f64,
}

pub fn movie_with_ratings(movie: Movie, ratings: Vec<Rating>) -> MovieWithRatings {
    MovieWithRatings {
        movie: movie.into(),
        ratings: ratings.into_iter().map(RatingBody::from).collect(),
    }
}

/// Join a full movie listing with a full rating listing: one pass to group
/// ratings by foreign key, one pass to attach.
pub fn movies_with_ratings(movies: Vec<Movie>, ratings: Vec<Rating>) -> Vec<MovieWithRatings> {
    let mut by_movie: HashMap<ObjectId, Vec<Rating>> = HashMap::new();
    for rating in ratings {
        by_movie.entry(rating.movie).or_default().push(rating);
    }
    movies
        .into_iter()
        .map(|movie| {
            let ratings = by_movie.remove(&movie.id).unwrap_or_default();
            movie_with_ratings(movie, ratings)
        })
        .collect()
}

pub fn rating_populated(rating: Rating, movie: Option<Movie>) -> RatingPopulated {
    RatingPopulated {
        id: rating.id.to_hex(),
        movie: movie.map(MovieBody::from),
        text: rating.text,
        score: rating.score,
    }
}

/// Resolve each rating's `movie` against a movie listing (lookup by id).
pub fn ratings_populated(ratings: Vec<Rating>, movies: Vec<Movie>) -> Vec<RatingPopulated> {
    let by_id: HashMap<ObjectId, Movie> = movies.into_iter().map(|m| (m.id, m)).collect();
    ratings
        .into_iter()
        .map(|rating| {
            let movie = by_id.get(&rating.movie).cloned();
            rating_populated(rating, movie)
        })
        .collect()
}

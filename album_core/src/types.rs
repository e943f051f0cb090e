use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

/// An album as returned by the search endpoint. Images are ordered
/// largest-first by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub images: Vec<Image>,
    pub release_date: Option<String>,
    pub total_tracks: u32,
    pub external_urls: ExternalUrls,
    pub album_type: String,
}

impl Album {
    /// Contributor names joined with `", "`, in provider order.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| &artist.name[..])
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Leading year of the release date, or an empty string.
    pub fn year(&self) -> String {
        self.release_date
            .as_deref()
            .map(|date| date.chars().take(4).collect())
            .unwrap_or_default()
    }

    pub fn cover_url(&self) -> &str {
        self.images.first().map(|image| &image.url[..]).unwrap_or("")
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.images.last().map(|image| &image.url[..])
    }

    /// One-line description used when listing suggestions.
    pub fn summary(&self) -> String {
        let mut line = self.name.clone();
        let artists = self.artist_names();
        if !artists.is_empty() {
            line.push_str(" - ");
            line.push_str(&artists);
        }
        let year = self.year();
        if !year.is_empty() {
            line.push_str(&format!(" ({})", year));
        }
        line
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub items: Vec<Album>,
}

/// Envelope of `GET /v1/search?type=album`.
#[derive(Debug, Deserialize, Serialize)]
pub struct SearchResponse {
    pub albums: AlbumPage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nevermind() -> Album {
        serde_json::from_str(
            r#"{
                "name": "Nevermind",
                "artists": [{"name": "Nirvana"}],
                "release_date": "1991-09-24",
                "images": [{"url": "big.jpg", "width": 640, "height": 640}, {"url": "small.jpg"}],
                "total_tracks": 12,
                "id": "abc",
                "external_urls": {"spotify": "http://x"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn deserializes_partial_payload() {
        let album = nevermind();
        assert_eq!(album.name, "Nevermind");
        assert_eq!(album.images[0].width, Some(640));
        assert_eq!(album.images[1].width, None);
        assert_eq!(album.album_type, "");
        assert_eq!(album.external_urls.spotify, "http://x");
    }

    #[test]
    fn derived_fields() {
        let mut album = nevermind();
        assert_eq!(album.year(), "1991");
        assert_eq!(album.cover_url(), "big.jpg");
        assert_eq!(album.thumbnail_url(), Some("small.jpg"));
        assert_eq!(album.summary(), "Nevermind - Nirvana (1991)");

        album.artists.push(Artist {
            name: "Butch Vig".to_owned(),
        });
        album.release_date = None;
        album.images.clear();
        assert_eq!(album.artist_names(), "Nirvana, Butch Vig");
        assert_eq!(album.year(), "");
        assert_eq!(album.cover_url(), "");
        assert_eq!(album.summary(), "Nevermind - Nirvana, Butch Vig");

        album.artists.clear();
        assert_eq!(album.summary(), "Nevermind");
        album.release_date = Some("1991".to_owned());
        assert_eq!(album.summary(), "Nevermind (1991)");
    }
}

use crate::config::ScrapeConfig;
use crate::constants::WILDCARD;

/// How a region ID is rendered into `state_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionIdStyle {
    Plain,
    /// Two digits, as the region list exports them ("06").
    ZeroPadded,
}

#[derive(Debug, Clone)]
pub struct RequestParams<'a> {
    pub country_code: &'a str,
    pub region_id: u32,
    pub band: Option<u32>,
    pub id_style: RegionIdStyle,
}

impl<'a> RequestParams<'a> {
    pub fn for_region(config: &'a ScrapeConfig, region_id: u32) -> Self {
        Self {
            country_code: &config.country_code,
            region_id,
            band: config.band,
            id_style: if config.zero_pad_region_id {
                RegionIdStyle::ZeroPadded
            } else {
                RegionIdStyle::Plain
            },
        }
    }

    fn state_id(&self) -> String {
        match self.id_style {
            RegionIdStyle::Plain => self.region_id.to_string(),
            RegionIdStyle::ZeroPadded => format!("{:02}", self.region_id),
        }
    }
}

/// Builds the display-page URL for one region. Location, call sign and
/// usage filters are always the wildcard.
pub fn build_url(base_url: &str, params: &RequestParams<'_>) -> String {
    let mut url = format!(
        "{}?country_code={}&state_id={}",
        base_url,
        params.country_code.to_uppercase(),
        params.state_id()
    );
    if let Some(band) = params.band {
        url.push_str(&format!("&band={}", band));
    }
    url.push_str(&format!("&loc={w}&call={w}&use={w}", w = WILDCARD));
    url
}

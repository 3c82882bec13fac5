use crate::deriver::{derive, MasterPassword};
use crate::error::Result;
use crate::filter::Filter;
use crate::parser::{parse_directive, Directive};
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

/// A named account and the filters that shape its password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    name: String,
    filters: Vec<Filter>,
}

impl Site {
    pub fn new(name: impl Into<String>, filters: Vec<Filter>) -> Self {
        Self {
            name: name.into(),
            filters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn password(&self, master: &MasterPassword) -> Result<Zeroizing<String>> {
        derive(&self.name, master, &self.filters)
    }
}

/// Sites in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteRegistry {
    sites: Vec<Site>,
}

impl SiteRegistry {
    /// Builds a registry from the full text of a site list.
    pub fn parse(text: &str) -> Self {
        build_registry(text.split('\n'))
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// First site declared under `name`.
    pub fn get(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.name == name)
    }
}

impl<'a> IntoIterator for &'a SiteRegistry {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

/// Walks raw site-list lines and attaches the active filter chain to each site.
///
/// Filters accumulate until a blank line, which resets the chain for every
/// site declared after it. Each site keeps its own copy of the chain.
pub fn build_registry<'a, I>(lines: I) -> SiteRegistry
where
    I: IntoIterator<Item = &'a str>,
{
    let mut sites = Vec::new();
    let mut pending: Vec<Filter> = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            pending.clear();
        } else if line.starts_with('#') {
            match parse_directive(line) {
                Directive::Filter(filter) => {
                    trace!(line = line_no, filter = %filter, "Filter directive");
                    pending.push(filter);
                }
                Directive::Malformed { kind, reason } => {
                    warn!(line = line_no, kind = %kind, "Ignoring filter directive: {}", reason);
                }
                Directive::Comment => trace!(line = line_no, "Comment"),
            }
        } else {
            sites.push(Site::new(line, pending.clone()));
        }
    }

    debug!(sites = sites.len(), "Loaded site list");
    SiteRegistry { sites }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_resets_chain() {
        let registry = SiteRegistry::parse("# @uppercase\nsite-a\n\nsite-b\n");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.sites()[0].name(), "site-a");
        assert_eq!(registry.sites()[0].filters(), &[Filter::Uppercase]);
        assert_eq!(registry.sites()[1].name(), "site-b");
        assert!(registry.sites()[1].filters().is_empty());
    }

    #[test]
    fn test_chain_shared_across_contiguous_sites() {
        let registry = SiteRegistry::parse("# @digit\none.com\ntwo.com\n");
        for site in &registry {
            assert_eq!(site.filters(), &[Filter::DigitMap]);
        }
    }

    #[test]
    fn test_filters_after_a_site_do_not_reach_back() {
        let registry = SiteRegistry::parse("# @uppercase\nfirst\n# @skip A\nsecond\n");

        assert_eq!(registry.get("first").unwrap().filters(), &[Filter::Uppercase]);
        assert_eq!(
            registry.get("second").unwrap().filters(),
            &[Filter::Uppercase, Filter::Skip('A')]
        );
    }

    #[test]
    fn test_declaration_order_preserved() {
        let registry = SiteRegistry::parse("zeta\nalpha\n\nmid\n");
        let names: Vec<&str> = registry.iter().map(Site::name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let lines = ["   # @lowercase  ", "\t example.com \r", "  \t ", "other"];
        let registry = build_registry(lines);

        assert_eq!(registry.sites()[0].name(), "example.com");
        assert_eq!(registry.sites()[0].filters(), &[Filter::Lowercase]);
        assert!(registry.get("other").unwrap().filters().is_empty());
    }

    #[test]
    fn test_comments_and_malformed_directives_are_skipped() {
        let text = "# my accounts\n# @replace onlyonearg\n# @bogus\n# @digit\nbank\n";
        let registry = SiteRegistry::parse(text);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.sites()[0].filters(), &[Filter::DigitMap]);
    }

    #[test]
    fn test_empty_input() {
        assert!(SiteRegistry::parse("").is_empty());
        assert!(SiteRegistry::parse("\n\n# @digit\n").is_empty());
    }

    #[test]
    fn test_crlf_line_endings() {
        let registry = SiteRegistry::parse("# @uppercase\r\nsite\r\n\r\nplain\r\n");
        assert_eq!(registry.get("site").unwrap().filters(), &[Filter::Uppercase]);
        assert!(registry.get("plain").unwrap().filters().is_empty());
    }

    #[test]
    fn test_site_password_uses_its_chain() {
        let registry = SiteRegistry::parse("# @substring 0 8\nexample.com\n");
        let master = MasterPassword::new("hunter2");
        let password = registry.sites()[0].password(&master).unwrap();
        assert_eq!(password.as_str(), "NmoLjCCW");
    }

    #[test]
    fn test_duplicate_names_keep_first_for_lookup() {
        let registry = SiteRegistry::parse("dup\n\n# @digit\ndup\n");
        assert_eq!(registry.len(), 2);
        assert!(registry.get("dup").unwrap().filters().is_empty());
    }
}

/// Polychrome categorical scheme "mpn65".
const MPN65: [&str; 65] = [
    "ff0029", "377eb8", "66a61e", "984ea3", "00d2d5", "ff7f00", "af8d00", "7f80cd", "b3e900",
    "c42e60", "a65628", "f781bf", "8dd3c7", "bebada", "fb8072", "80b1d3", "fdb462", "fccde5",
    "bc80bd", "ffed6f", "c4eaff", "cf8c00", "1b9e77", "d95f02", "e7298a", "e6ab02", "a6761d",
    "0097ff", "00d067", "000000", "252525", "525252", "737373", "969696", "bdbdbd", "f43600",
    "4ba93b", "5779bb", "927acc", "97ee3f", "bf3947", "9f5b00", "f48758", "8caed6", "f2b94f",
    "eff26e", "e43872", "d9b100", "9d7a00", "698cff", "d9d9d9", "00d27e", "d06800", "009f82",
    "c49200", "cbe8ff", "fecddf", "c27eb6", "8cd2ce", "c4b8d9", "f883b0", "a49100", "f48800",
    "27d0df", "a04a9b",
];

/// First `count` colors of the scheme as `#rrggbb`, cycling past the end.
pub fn mpn65(count: usize) -> Vec<String> {
    MPN65
        .iter()
        .cycle()
        .take(count)
        .map(|hex| format!("#{hex}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_prefix() {
        assert_eq!(mpn65(3), vec!["#ff0029", "#377eb8", "#66a61e"]);
        assert_eq!(mpn65(3), mpn65(3));
        assert!(mpn65(0).is_empty());
    }

    #[test]
    fn distinct_within_scheme() {
        let colors = mpn65(65);
        let mut unique = colors.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 65);
    }

    #[test]
    fn wraps_past_the_end() {
        let colors = mpn65(67);
        assert_eq!(colors[65], "#ff0029");
        assert_eq!(colors[66], "#377eb8");
    }
}

/// Wire string of a flag list: the names of the set bits joined with `+`, in
/// declaration order. Bit `i` corresponds to `names[i]`.
///
/// Bits in `extras` are exclusive values (`"all"`, `"none"`): when any of them
/// is set, only the first set extra is written.
#[must_use]
pub fn join_flags(bits: u64, names: &[&str], extras: u64) -> String {
    let set = |index: &usize| *index < 64 && bits & (1_u64 << *index) != 0;
    if bits & extras != 0
        && let Some(extra) = (0..names.len()).filter(set).find(|index| extras & (1_u64 << *index) != 0)
    {
        return names[extra].to_string();
    }
    (0..names.len())
        .filter(set)
        .map(|index| names[index])
        .collect::<Vec<&str>>()
        .join("+")
}

/// Inverse of [`join_flags`]. `None` when any part is not a declared name, or
/// an extra is combined with anything else.
#[must_use]
pub fn split_flags(wire: &str, names: &[&str], extras: u64) -> Option<u64> {
    if wire.is_empty() {
        return Some(0);
    }
    let bits: u64 = wire.split('+').try_fold(0_u64, |bits, part| {
        let index: usize = names.iter().position(|name| *name == part)?;
        Some(bits | (1_u64 << index))
    })?;
    if bits & extras != 0 && bits.count_ones() > 1 {
        return None;
    }
    Some(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &["lines", "markers", "text", "none"];
    const EXTRAS: u64 = 0b1000;

    #[test]
    fn joins_in_declaration_order() {
        assert_eq!("lines+text", join_flags(0b101, NAMES, EXTRAS));
        assert_eq!("none", join_flags(0b1000, NAMES, EXTRAS));
        assert_eq!("", join_flags(0, NAMES, EXTRAS));
    }

    #[test]
    fn extras_are_written_alone() {
        assert_eq!("none", join_flags(0b1001, NAMES, EXTRAS));
        assert_eq!("none", join_flags(0b1111, NAMES, EXTRAS));

        let with_all: &[&str] = &["x", "y", "all", "skip"];
        assert_eq!("all", join_flags(0b1101, with_all, 0b1100));
    }

    #[test]
    fn split_accepts_any_order() {
        assert_eq!(Some(0b011), split_flags("markers+lines", NAMES, EXTRAS));
        assert_eq!(Some(0b1000), split_flags("none", NAMES, EXTRAS));
        assert_eq!(Some(0), split_flags("", NAMES, EXTRAS));
    }

    #[test]
    fn split_rejects_unknown_flag() {
        assert_eq!(None, split_flags("lines+bogus", NAMES, EXTRAS));
    }

    #[test]
    fn split_rejects_extras_in_combination() {
        assert_eq!(None, split_flags("lines+none", NAMES, EXTRAS));
    }
}

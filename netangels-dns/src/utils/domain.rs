//! 域名处理与 TTL 归一化

/// Strip at most one trailing dot from a domain name.
///
/// `"a.b.com."` becomes `"a.b.com"`; names without a trailing dot are returned
/// unchanged. Multiple trailing dots are not collapsed: `"a.b.com.."` becomes
/// `"a.b.com."`.
pub fn trim_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Apply the default TTL to non-positive values.
///
/// Values above `u32::MAX` saturate.
pub fn normalize_ttl(ttl: i64, default_ttl: u32) -> u32 {
    if ttl <= 0 {
        default_ttl
    } else {
        u32::try_from(ttl).unwrap_or(u32::MAX)
    }
}

/// Whether `zone` is `fqdn` itself or one of its parent domains.
///
/// 如: "www.example.com" 属于 "example.com"，但 "badexample.com" 不属于。
pub fn is_within_zone(fqdn: &str, zone: &str) -> bool {
    let fqdn = trim_trailing_dot(fqdn);
    let zone = trim_trailing_dot(zone);
    if zone.is_empty() {
        return false;
    }
    fqdn == zone
        || fqdn
            .strip_suffix(zone)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// 将完整域名转换为相对名称
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "@"
pub fn full_name_to_relative(full_name: &str, zone_name: &str) -> String {
    let full = trim_trailing_dot(full_name);
    let zone = trim_trailing_dot(zone_name);

    if full == zone {
        "@".to_string()
    } else if let Some(subdomain) = full.strip_suffix(&format!(".{zone}")) {
        subdomain.to_string()
    } else {
        full.to_string()
    }
}

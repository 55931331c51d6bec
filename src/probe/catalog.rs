//! Well-known path catalog
//!
//! Paths are relative to the site origin. The catalog is read-only and
//! shared by every scan.

pub const DEFAULT_PROBE_PATHS: &[&str] = &[
    // Security and policy files
    "robots.txt",
    "security.txt",
    ".well-known/security.txt",
    "humans.txt",
    "ads.txt",
    ".htaccess",
    ".htpasswd",
    // Sitemaps
    "sitemap.xml",
    "sitemap_index.xml",
    "sitemap1.xml",
    // Environment and configuration
    ".env",
    ".env.local",
    ".env.production",
    ".env.development",
    "config.php",
    "configuration.php",
    "settings.php",
    "wp-config.php",
    "database.yml",
    "database.json",
    "config.json",
    "config.yml",
    // Version control metadata
    ".git/config",
    ".git/HEAD",
    ".hg/store",
    ".svn/entries",
    // API descriptions and consoles
    "swagger.json",
    "openapi.json",
    "api-docs",
    "graphql",
    "graphiql",
    "playground",
    // Backups and dumps
    "backup.zip",
    "backup.tar.gz",
    "backup.sql",
    "dump.sql",
    "database.backup",
    "backup/database.sql",
    // Logs
    "error_log",
    "access.log",
    "error.log",
    // Admin endpoints
    "phpinfo.php",
    "test.php",
    "info.php",
    "admin.php",
    "administrator/",
    "wp-admin/",
    "cpanel/",
    "webmail/",
    // Cross-domain policies
    "crossdomain.xml",
    "clientaccesspolicy.xml",
    // Package manifests and project files
    "package.json",
    "composer.json",
    "requirements.txt",
    "README.md",
    "LICENSE",
    "CHANGELOG.md",
];

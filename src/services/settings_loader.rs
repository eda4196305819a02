//! Assembles the NetBox settings namespace from the environment.

use tracing::{info, instrument};

use crate::domain::errors::SettingsResult;
use crate::domain::models::{
    DatabaseSettings, EmailSettings, NetBoxSettings, RedisConnection, RedisSettings,
};
use crate::domain::ports::EnvSource;
use crate::infrastructure::env::{EnvReader, ProcessEnv};

/// Delimiter for plain list settings.
pub const LIST_DELIMITER: &str = ",";

/// Delimiter for `CORS_ORIGIN_REGEX_WHITELIST`; patterns may contain commas.
pub const PATTERN_DELIMITER: &str = "||";

/// Loads [`NetBoxSettings`] from an environment source.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load from the real process environment.
    pub fn from_process_env() -> SettingsResult<NetBoxSettings> {
        Self::load(ProcessEnv)
    }

    /// Load every setting from `source`, falling back to the documented
    /// defaults. The first malformed value aborts the whole load.
    #[instrument(skip_all)]
    pub fn load<S: EnvSource>(source: S) -> SettingsResult<NetBoxSettings> {
        let env = EnvReader::new(source);
        let d = NetBoxSettings::default();

        let settings = NetBoxSettings {
            allowed_hosts: env.get_list("ALLOWED_HOSTS", d.allowed_hosts, LIST_DELIMITER),
            database: load_database(&env, d.database)?,
            redis: load_redis(&env, d.redis)?,
            secret_key: env.get_string("SECRET_KEY", d.secret_key),

            admins: env.get_admins("ADMINS")?,
            banner_top: env.get_string("BANNER_TOP", d.banner_top),
            banner_bottom: env.get_string("BANNER_BOTTOM", d.banner_bottom),
            banner_login: env.get_string("BANNER_LOGIN", d.banner_login),
            base_path: env.get_string("BASE_PATH", d.base_path),
            cache_timeout: env.get_int("CACHE_TIMEOUT", d.cache_timeout)?,
            changelog_retention: env.get_int("CHANGELOG_RETENTION", d.changelog_retention)?,
            cors_origin_allow_all: env.get_bool("CORS_ORIGIN_ALLOW_ALL", d.cors_origin_allow_all),
            cors_origin_whitelist: env.get_list(
                "CORS_ORIGIN_WHITELIST",
                d.cors_origin_whitelist,
                LIST_DELIMITER,
            ),
            cors_origin_regex_whitelist: env
                .get_regex_list("CORS_ORIGIN_REGEX_WHITELIST", PATTERN_DELIMITER)?,
            debug: env.get_bool("DEBUG", d.debug),
            email: load_email(&env, d.email)?,
            enforce_global_unique: env.get_bool("ENFORCE_GLOBAL_UNIQUE", d.enforce_global_unique),
            exempt_view_permissions: env.get_list(
                "EXEMPT_VIEW_PERMISSIONS",
                d.exempt_view_permissions,
                LIST_DELIMITER,
            ),
            logging: env.get_json("LOGGING", d.logging)?,
            login_required: env.get_bool("LOGIN_REQUIRED", d.login_required),
            login_timeout: env.get_int("LOGIN_TIMEOUT", d.login_timeout)?,
            maintenance_mode: env.get_bool("MAINTENANCE_MODE", d.maintenance_mode),
            max_page_size: env.get_int("MAX_PAGE_SIZE", d.max_page_size)?,
            media_root: env.get_string("MEDIA_ROOT", d.media_root),
            storage_config: env.get_opt_json("STORAGE_CONFIG")?,
            metrics_enabled: env.get_bool("METRICS_ENABLED", d.metrics_enabled),
            napalm_username: env.get_string("NAPALM_USERNAME", d.napalm_username),
            napalm_password: env.get_string("NAPALM_PASSWORD", d.napalm_password),
            napalm_timeout: env.get_int("NAPALM_TIMEOUT", d.napalm_timeout)?,
            napalm_args: env.get_json("NAPALM_ARGS", d.napalm_args)?,
            paginate_count: env.get_int("PAGINATE_COUNT", d.paginate_count)?,
            plugins: env.get_list("PLUGINS", d.plugins, LIST_DELIMITER),
            plugins_config: env.get_json("PLUGINS_CONFIG", d.plugins_config)?,
            prefer_ipv4: env.get_bool("PREFER_IPV4", d.prefer_ipv4),
            remote_auth_enabled: env.get_bool("REMOTE_AUTH_ENABLED", d.remote_auth_enabled),
            remote_auth_backend: env.get_string("REMOTE_AUTH_BACKEND", d.remote_auth_backend),
            remote_auth_header: env.get_string("REMOTE_AUTH_HEADER", d.remote_auth_header),
            remote_auth_auto_create_user: env.get_bool(
                "REMOTE_AUTH_AUTO_CREATE_USER",
                d.remote_auth_auto_create_user,
            ),
            remote_auth_default_groups: env.get_list(
                "REMOTE_AUTH_DEFAULT_GROUPS",
                d.remote_auth_default_groups,
                LIST_DELIMITER,
            ),
            remote_auth_default_permissions: env.get_list(
                "REMOTE_AUTH_DEFAULT_PERMISSIONS",
                d.remote_auth_default_permissions,
                LIST_DELIMITER,
            ),
            release_check_timeout: env.get_int("RELEASE_CHECK_TIMEOUT", d.release_check_timeout)?,
            release_check_url: env.get_opt_string("RELEASE_CHECK_URL"),
            reports_root: env.get_string("REPORTS_ROOT", d.reports_root),
            scripts_root: env.get_string("SCRIPTS_ROOT", d.scripts_root),
            plugins_enabled: env.get_bool("PLUGINS_ENABLED", d.plugins_enabled),
            session_file_path: env.get_opt_string("SESSION_FILE_PATH"),
            time_zone: env.get_first_string(&["TIME_ZONE", "TZ"], d.time_zone),

            date_format: env.get_string("DATE_FORMAT", d.date_format),
            short_date_format: env.get_string("SHORT_DATE_FORMAT", d.short_date_format),
            time_format: env.get_string("TIME_FORMAT", d.time_format),
            short_time_format: env.get_string("SHORT_TIME_FORMAT", d.short_time_format),
            datetime_format: env.get_string("DATETIME_FORMAT", d.datetime_format),
            short_datetime_format: env.get_string("SHORT_DATETIME_FORMAT", d.short_datetime_format),
        };

        info!(
            allowed_hosts = settings.allowed_hosts.len(),
            plugins = settings.plugins.len(),
            debug = settings.debug,
            "settings loaded"
        );
        Ok(settings)
    }
}

fn load_database<S: EnvSource>(
    env: &EnvReader<S>,
    d: DatabaseSettings,
) -> SettingsResult<DatabaseSettings> {
    Ok(DatabaseSettings {
        name: env.get_string("POSTGRES_DB", d.name),
        user: env.get_string("POSTGRES_USER", d.user),
        password: env.get_string("POSTGRES_PASSWORD", d.password),
        host: env.get_string("POSTGRES_HOST", d.host),
        port: env.get_string("POSTGRES_PORT", d.port),
        conn_max_age: env.get_int("POSTGRES_CONN_MAX_AGE", d.conn_max_age)?,
    })
}

fn load_redis<S: EnvSource>(env: &EnvReader<S>, d: RedisSettings) -> SettingsResult<RedisSettings> {
    Ok(RedisSettings {
        tasks: load_redis_connection(env, "REDIS_TASKS", d.tasks)?,
        caching: load_redis_connection(env, "REDIS_CACHE", d.caching)?,
    })
}

fn load_redis_connection<S: EnvSource>(
    env: &EnvReader<S>,
    prefix: &str,
    d: RedisConnection,
) -> SettingsResult<RedisConnection> {
    let var = |suffix: &str| format!("{prefix}_{suffix}");
    Ok(RedisConnection {
        host: env.get_string(&var("HOST"), d.host),
        port: env.get_int(&var("PORT"), d.port)?,
        password: env.get_string(&var("PASSWORD"), d.password),
        database: env.get_int(&var("DB"), d.database)?,
        default_timeout: env.get_int(&var("DEFAULT_TIMEOUT"), d.default_timeout)?,
        ssl: env.get_bool(&var("SSL"), d.ssl),
    })
}

fn load_email<S: EnvSource>(env: &EnvReader<S>, d: EmailSettings) -> SettingsResult<EmailSettings> {
    Ok(EmailSettings {
        server: env.get_string("EMAIL_SERVER", d.server),
        port: env.get_int("EMAIL_PORT", d.port)?,
        username: env.get_string("EMAIL_USERNAME", d.username),
        password: env.get_string("EMAIL_PASSWORD", d.password),
        timeout: env.get_int("EMAIL_TIMEOUT", d.timeout)?,
        from_email: env.get_string("EMAIL_FROM", d.from_email),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SettingsError;
    use crate::domain::models::Admin;
    use crate::infrastructure::env::MapEnv;
    use serde_json::json;

    #[test]
    fn test_documented_defaults() {
        let s = SettingsLoader::load(MapEnv::new()).unwrap();

        assert_eq!(s.allowed_hosts, vec!["*"]);
        assert_eq!(s.database.password, "netbox");
        assert_eq!(s.database.port, "5432");
        assert_eq!(s.redis.tasks.port, 6379);
        assert_eq!(s.redis.tasks.database, 0);
        assert_eq!(s.redis.caching.database, 1);
        assert_eq!(s.cache_timeout, 900);
        assert_eq!(s.login_timeout, 1_209_600);
        assert_eq!(s.release_check_timeout, 86_400);
        assert!(s.remote_auth_auto_create_user);
        assert!(!s.cors_origin_allow_all);
        assert!(s.storage_config.is_none());
        assert!(s.release_check_url.is_none());
        assert_eq!(s.time_zone, "UTC");
        assert_eq!(s.plugins_config, json!({}));
    }

    #[test]
    fn test_redis_tasks_port() {
        let s = SettingsLoader::load(MapEnv::new().with("REDIS_TASKS_PORT", "6380")).unwrap();
        assert_eq!(s.redis.tasks.port, 6380);
        assert_eq!(s.redis.caching.port, 6379);

        let err = SettingsLoader::load(MapEnv::new().with("REDIS_TASKS_PORT", "abc")).unwrap_err();
        assert_eq!(err.variable(), "REDIS_TASKS_PORT");
    }

    #[test]
    fn test_redis_connections_are_independent() {
        let env = MapEnv::new()
            .with("REDIS_CACHE_HOST", "cache.internal")
            .with("REDIS_CACHE_DB", "4")
            .with("REDIS_CACHE_SSL", "t")
            .with("REDIS_TASKS_PASSWORD", "hunter2");
        let s = SettingsLoader::load(env).unwrap();

        assert_eq!(s.redis.caching.host, "cache.internal");
        assert_eq!(s.redis.caching.database, 4);
        assert!(s.redis.caching.ssl);
        assert_eq!(s.redis.tasks.host, "redis");
        assert_eq!(s.redis.tasks.password, "hunter2");
        assert!(!s.redis.tasks.ssl);
    }

    #[test]
    fn test_cors_origin_allow_all() {
        let load = |value: Option<&str>| {
            let env = value.map_or_else(MapEnv::new, |v| {
                MapEnv::new().with("CORS_ORIGIN_ALLOW_ALL", v)
            });
            SettingsLoader::load(env).unwrap().cors_origin_allow_all
        };
        assert!(!load(None));
        assert!(load(Some("True")));
        assert!(!load(Some("nope")));
    }

    #[test]
    fn test_remote_auth_auto_create_user_present_but_unrecognized() {
        let s = SettingsLoader::load(MapEnv::new().with("REMOTE_AUTH_AUTO_CREATE_USER", "no"))
            .unwrap();
        assert!(!s.remote_auth_auto_create_user);
    }

    #[test]
    fn test_plugins_config() {
        let s = SettingsLoader::load(MapEnv::new().with("PLUGINS_CONFIG", r#"{"foo":{"bar":1}}"#))
            .unwrap();
        assert_eq!(s.plugins_config, json!({"foo": {"bar": 1}}));

        let err =
            SettingsLoader::load(MapEnv::new().with("PLUGINS_CONFIG", "{invalid}")).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidJson { ref name, .. } if name == "PLUGINS_CONFIG"));
    }

    #[test]
    fn test_lists_preserve_order() {
        let env = MapEnv::new()
            .with("ALLOWED_HOSTS", "netbox.example.com,netbox.internal.local")
            .with("PLUGINS", "netbox_bgp,netbox_topology_views")
            .with("EXEMPT_VIEW_PERMISSIONS", "dcim.site,*");
        let s = SettingsLoader::load(env).unwrap();

        assert_eq!(s.allowed_hosts, vec!["netbox.example.com", "netbox.internal.local"]);
        assert_eq!(s.plugins, vec!["netbox_bgp", "netbox_topology_views"]);
        assert_eq!(s.exempt_view_permissions, vec!["dcim.site", "*"]);
    }

    #[test]
    fn test_admins_and_patterns() {
        let env = MapEnv::new()
            .with("ADMINS", "Jane Doe::jdoe@example.com")
            .with("CORS_ORIGIN_REGEX_WHITELIST", r"^https://a\.example\.com$||^https://b,c$");
        let s = SettingsLoader::load(env).unwrap();

        assert_eq!(s.admins, vec![Admin::new("Jane Doe", "jdoe@example.com")]);
        let sources: Vec<&str> = s
            .cors_origin_regex_whitelist
            .iter()
            .map(|p| p.as_str())
            .collect();
        assert_eq!(sources, vec![r"^https://a\.example\.com$", "^https://b,c$"]);
    }

    #[test]
    fn test_time_zone_fallback() {
        let s = SettingsLoader::load(MapEnv::new().with("TZ", "America/Chicago")).unwrap();
        assert_eq!(s.time_zone, "America/Chicago");

        let s = SettingsLoader::load(
            MapEnv::new()
                .with("TZ", "America/Chicago")
                .with("TIME_ZONE", "Europe/Paris"),
        )
        .unwrap();
        assert_eq!(s.time_zone, "Europe/Paris");
    }

    #[test]
    fn test_storage_config_only_when_set() {
        let s = SettingsLoader::load(
            MapEnv::new().with("STORAGE_CONFIG", r#"{"AWS_STORAGE_BUCKET_NAME":"netbox"}"#),
        )
        .unwrap();
        assert_eq!(
            s.storage_config,
            Some(json!({"AWS_STORAGE_BUCKET_NAME": "netbox"}))
        );
    }

    #[test]
    fn test_every_integer_setting_rejects_garbage() {
        let vars = [
            "POSTGRES_CONN_MAX_AGE",
            "REDIS_TASKS_PORT",
            "REDIS_TASKS_DB",
            "REDIS_TASKS_DEFAULT_TIMEOUT",
            "REDIS_CACHE_PORT",
            "REDIS_CACHE_DB",
            "REDIS_CACHE_DEFAULT_TIMEOUT",
            "CACHE_TIMEOUT",
            "CHANGELOG_RETENTION",
            "EMAIL_PORT",
            "EMAIL_TIMEOUT",
            "LOGIN_TIMEOUT",
            "MAX_PAGE_SIZE",
            "NAPALM_TIMEOUT",
            "PAGINATE_COUNT",
            "RELEASE_CHECK_TIMEOUT",
        ];
        for var in vars {
            let err = SettingsLoader::load(MapEnv::new().with(var, "abc")).unwrap_err();
            assert_eq!(err.variable(), var);
        }
    }

    #[test]
    fn test_every_json_setting_rejects_garbage() {
        for var in ["LOGGING", "NAPALM_ARGS", "PLUGINS_CONFIG", "STORAGE_CONFIG"] {
            let err = SettingsLoader::load(MapEnv::new().with(var, "{invalid}")).unwrap_err();
            assert_eq!(err.variable(), var);
        }
    }
}

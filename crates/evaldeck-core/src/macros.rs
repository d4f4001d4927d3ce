/// Resolve a setting from the environment, falling back to the compiled
/// default in `settings` when the var is unset or unparsable.
#[macro_export]
macro_rules! get_evaldeck_setting {
    ($setting:ident) => {
        ::std::env::var(stringify!($setting))
            .unwrap_or($crate::settings::$setting.to_string())
    };
    ($setting:ident, usize) => {
        match ::std::env::var(stringify!($setting)) {
            Ok(v) => match v.parse() {
                Ok(i) => i,
                Err(_e) => {
                    ::log::warn!(
                        "Env var setting {} is not a valid unsigned integer. Using default",
                        stringify!($setting)
                    );
                    $crate::settings::$setting
                }
            },
            Err(_e) => $crate::settings::$setting,
        }
    };
}

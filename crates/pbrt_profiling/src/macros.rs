/// Times the rest of the enclosing scope under the given name, for as long
/// as the returned guard lives.
#[macro_export]
macro_rules! profile_scope {
    ($profiler:expr, $name:expr) => {
        let _profile_scope_timer = $profiler.scoped($name);
    };
}

/// Evaluates the expression while timing it under the given name.
#[macro_export]
macro_rules! profile_expression {
    ($profiler:expr, $name:expr, $expression:expr) => {{
        let _profile_scope_timer = $profiler.scoped($name);
        $expression
    }};
}

//! Utility macros.

/// Implements a binary operator for all four combinations of owned and
/// borrowed operands. The body receives both operands by reference. The
/// bracketed list holds the generic parameters of the impl, optionally
/// followed by `where [...]` with its bounds.
macro_rules! impl_binop {
    (
        [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $op:ident, $method:ident, $tl:ty, $tr:ty, $to:ty,
        |$lhs:ident, $rhs:ident| $body:block
    ) => {
        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for &'a $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for &$tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                self.$method(&rhs)
            }
        }

        impl<'a, $($generics)*> ::std::ops::$op<&'a $tr> for $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: &'a $tr) -> Self::Output {
                (&self).$method(rhs)
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self, rhs: $tr) -> Self::Output {
                (&self).$method(&rhs)
            }
        }
    };
}

/// Implements a unary operator for an owned and a borrowed operand.
macro_rules! impl_unary_op {
    (
        [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $op:ident, $method:ident, $t:ty, $to:ty,
        |$this:ident| $body:block
    ) => {
        impl<$($generics)*> ::std::ops::$op for &$t
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                let $this = self;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op for $t
        $(where $($bounds)*)?
        {
            type Output = $to;

            #[inline]
            fn $method(self) -> Self::Output {
                (&self).$method()
            }
        }
    };
}

/// Implements a compound assignment operator for an owned and a borrowed
/// right hand side.
macro_rules! impl_binop_assign {
    (
        [$($generics:tt)*] $(where [$($bounds:tt)*])?,
        $op:ident, $method:ident, $tl:ty, $tr:ty,
        |$lhs:ident, $rhs:ident| $body:block
    ) => {
        impl<$($generics)*> ::std::ops::$op<&$tr> for $tl
        $(where $($bounds)*)?
        {
            #[inline]
            fn $method(&mut self, rhs: &$tr) {
                let $lhs = self;
                let $rhs = rhs;
                $body
            }
        }

        impl<$($generics)*> ::std::ops::$op<$tr> for $tl
        $(where $($bounds)*)?
        {
            #[inline]
            fn $method(&mut self, rhs: $tr) {
                self.$method(&rhs);
            }
        }
    };
}

macro_rules! tuple_impl {
    ($($c:ident),*) => {
        tuple_impl!([] [$($c)*]);
    };

    ([$($c:ident)*] []) => {
        impl<$($c),*> crate::component::ComponentSet for ($($c,)*)
        where
            $($c: crate::component::ComponentSet),*
        {
            #[allow(unused)]
            fn insert(
                builder: &mut crate::component::SignatureBuilder<'_>,
            ) -> Result<(), crate::component::ComponentError> {
                $($c::insert(builder)?;)*

                Ok(())
            }
        }
    };

    ([$($rest:ident)*] [$head:ident $($tail:ident)*]) => {
        tuple_impl!([$($rest)*] []);
        tuple_impl!([$($rest)* $head] [$($tail)*]);
    };
}

tuple_impl!(C0, C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11, C12, C13, C14, C15);

use super::*;

#[test]
fn catalog_caption_pluralizes() {
    assert_eq!(catalog_caption(12, 3), "12 livros organizados em 3 áreas do direito");
    assert_eq!(catalog_caption(1, 1), "1 livro organizado em 1 área do direito");
}

use crate::content::literal;
use log::debug;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use quire_render_core::{BackendError, OutlineNode};

/// Writes the outline dictionaries and returns the id of the `/Outlines` root.
///
/// Every item jumps to its page with a `/FitH` destination at its top offset.
pub(crate) fn write_outlines(
    document: &mut Document,
    page_ids: &[ObjectId],
    roots: &[OutlineNode],
) -> Result<Option<ObjectId>, BackendError> {
    if roots.is_empty() {
        return Ok(None);
    }
    let root_id = document.new_object_id();
    let ids = write_level(document, page_ids, roots, root_id)?;
    let total: usize = roots.iter().map(OutlineNode::count).sum();
    let (first, last) = (ids[0], ids[ids.len() - 1]);
    document.objects.insert(
        root_id,
        dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => total as i64,
        }
        .into(),
    );
    debug!("Wrote {} outline items.", total);
    Ok(Some(root_id))
}

fn write_level(
    document: &mut Document,
    page_ids: &[ObjectId],
    items: &[OutlineNode],
    parent_id: ObjectId,
) -> Result<Vec<ObjectId>, BackendError> {
    let ids: Vec<ObjectId> = items.iter().map(|_| document.new_object_id()).collect();
    for (i, item) in items.iter().enumerate() {
        let page_id = page_ids.get(item.page.0).copied().ok_or_else(|| {
            BackendError::new(format!("bookmark '{}' points at missing {}", item.id, item.page))
        })?;
        let mut dict: Dictionary = dictionary! {
            "Title" => literal(&item.title),
            "Parent" => parent_id,
            "Dest" => vec![Object::Reference(page_id), "FitH".into(), item.top.into()],
        };
        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        }
        if !item.children.is_empty() {
            let children = write_level(document, page_ids, &item.children, ids[i])?;
            dict.set("First", children[0]);
            dict.set("Last", children[children.len() - 1]);
            // Negative: children start collapsed.
            dict.set("Count", -((item.count() - 1) as i64));
        }
        document.objects.insert(ids[i], dict.into());
    }
    Ok(ids)
}

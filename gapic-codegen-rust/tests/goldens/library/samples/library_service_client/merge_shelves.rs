// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START library_v1_generated_library_service_client_merge_shelves]
use std::error::Error;

use example_library_v1::LibraryServiceClient;
use example_library_v1::model::MergeShelvesRequest;
use example_library_v1::resources::ShelfName;

pub fn sample_merge_shelves(client: &LibraryServiceClient) -> Result<(), Box<dyn Error>> {
    let request = MergeShelvesRequest {
        name: ShelfName::of("[SHELF]").to_string(),
        other_shelf: ShelfName::of("[SHELF]").to_string(),
        ..Default::default()
    };
    let response = client.merge_shelves(request)?;
    println!("{response:?}");
    Ok(())
}
// [END library_v1_generated_library_service_client_merge_shelves]

// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START library_v1_generated_library_service_client_list_books]
use std::error::Error;

use example_library_v1::LibraryServiceClient;
use example_library_v1::model::ListBooksRequest;
use example_library_v1::resources::ShelfName;

pub fn sample_list_books(client: &LibraryServiceClient) -> Result<(), Box<dyn Error>> {
    let request = ListBooksRequest {
        parent: ShelfName::of("[SHELF]").to_string(),
        ..Default::default()
    };
    for item in client.list_books(request) {
        let item = item?;
        println!("{item:?}");
    }
    Ok(())
}
// [END library_v1_generated_library_service_client_list_books]
